//! The NovelHub route table.

use crate::route::RouteDescriptor;

/// Path of the home route. Redirects to [`INDEX`].
pub const HOME: &str = "/";

/// Path of the main screen hosting every management view.
pub const INDEX: &str = "/index";

/// Path of the login screen.
pub const LOGIN: &str = "/login";

/// Build the application's route table.
pub fn default_routes() -> Vec<RouteDescriptor> {
    let screen = |path: &str| RouteDescriptor::new(path, path).requires_auth();
    let admin_screen = |path: &str| screen(path).requires_admin();

    vec![
        RouteDescriptor::new(HOME, "home").redirect(INDEX),
        RouteDescriptor::new(INDEX, "index")
            .requires_auth()
            .children(vec![
                admin_screen("usermgm"),
                admin_screen("userrole"),
                screen("novelstyle"),
                screen("novelmgm"),
                screen("novelchapter"),
                screen("usercomment"),
                screen("userpoint"),
                screen("userprofile"),
                screen("transconverthistory"),
                screen("machinetrans"),
                screen("usercorrection"),
                screen("resourceaudiostyle"),
                screen("resourcegenaudio"),
                screen("resourcegenimage"),
                screen("resourcegenvideo"),
                screen("ollamaprompt"),
                screen("sdparam"),
                screen("loginhistory"),
                screen("changepassword"),
                screen("supportlang"),
            ]),
        RouteDescriptor::new(LOGIN, "login"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::flatten;

    #[test]
    fn test_route_names_are_unique() {
        let flat = flatten(&default_routes());
        let mut names: Vec<_> = flat.iter().map(|r| r.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_only_user_management_is_admin() {
        let flat = flatten(&default_routes());
        let admin: Vec<_> = flat
            .iter()
            .filter(|r| r.meta.requires_admin)
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(admin, vec!["/index/usermgm", "/index/userrole"]);
    }

    #[test]
    fn test_every_screen_requires_auth() {
        let flat = flatten(&default_routes());
        for route in flat.iter().filter(|r| r.path.starts_with(INDEX)) {
            assert!(route.meta.requires_auth, "{} should require auth", route.path);
        }
        let login = flat.iter().find(|r| r.path == LOGIN).unwrap();
        assert!(!login.meta.requires_auth);
    }
}
