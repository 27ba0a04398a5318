//! Resource endpoint tests against a mock backend.

mod common;

use anyhow::Result;
use common::TestBackend;
use novelhub_client::{
    Authorization, CreateAudioStyle, CreateChapter, CreateComment, CreateConvertHistory,
    CreateGenAudio, CreateGenImage, CreateGenVideo, CreateMachineTranslation, CreateNovel,
    CreateOllamaPrompt, CreateRole, CreateStableDiffusionParam, CreateStyle, CreateSupport,
    CreateUser, CreateUserCorrection, Error, NovelMark, PageQuery, UpdateUser,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_fields_joins_field_names() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    Mock::given(method("GET"))
        .and(path(TestBackend::api("novels")))
        .and(query_param("fields", "id,name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Dune"}])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let novels = backend.client.novels().list_fields(&["id", "name"]).await?;
    assert_eq!(novels[0]["name"], "Dune");

    Ok(())
}

#[tokio::test]
async fn test_chapters_of_novel() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    Mock::given(method("GET"))
        .and(path(TestBackend::api("novels/7/chapters")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"chapter_number": 1}])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let chapters = backend.client.novels().chapters(7).await?;
    assert_eq!(chapters.as_array().map(Vec::len), Some(1));

    Ok(())
}

#[tokio::test]
async fn test_create_update_delete_pass_through() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    Mock::given(method("POST"))
        .and(path(TestBackend::api("novels")))
        .and(body_json(json!({"name": "Dune", "language": 2})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9, "name": "Dune"})))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(TestBackend::api("novels/9")))
        .and(body_json(json!({"description": "Spice"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(TestBackend::api("novels/9")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.server)
        .await;

    let novels = backend.client.novels();
    let created = novels
        .create(&CreateNovel {
            name: "Dune".to_string(),
            description: None,
            language: 2,
            author_id: None,
        })
        .await?;
    assert_eq!(created["id"], 9);

    novels.update(9, &json!({"description": "Spice"})).await?;
    novels.delete(9).await?;

    Ok(())
}

#[tokio::test]
async fn test_typed_create_body_for_chapters() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    Mock::given(method("POST"))
        .and(path(TestBackend::api("novel_chapters")))
        .and(body_json(json!({
            "novel_id": 3,
            "chapter_number": 1,
            "title": "Arrival",
            "content": "..."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 30})))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend
        .client
        .chapters()
        .create(&CreateChapter {
            novel_id: 3,
            chapter_number: 1,
            title: "Arrival".to_string(),
            content: "...".to_string(),
        })
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_paged_listing_sends_query() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    Mock::given(method("GET"))
        .and(path(TestBackend::api("audio_styles")))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "20"))
        .and(query_param("search", "calm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "total": 0})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let query = PageQuery::default().page(2).per_page(20).search("calm");
    let page = backend.client.audio_styles().list_page(&query).await?;
    assert_eq!(page["total"], 0);

    Ok(())
}

#[tokio::test]
async fn test_choice_lists() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    Mock::given(method("GET"))
        .and(path(TestBackend::api("supportlang_choices")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[1, "English"]])))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TestBackend::api("audio_style_choices")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[4, "Narrator"]])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let choices = backend.client.choices();
    assert_eq!(choices.languages().await?[0][1], "English");
    assert_eq!(choices.audio_styles().await?[0][1], "Narrator");

    Ok(())
}

#[tokio::test]
async fn test_not_found_and_api_errors() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    Mock::given(method("GET"))
        .and(path(TestBackend::api("gen_audios/404")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "No such audio"})))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(TestBackend::api("roles/1")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Forbidden"})))
        .mount(&backend.server)
        .await;

    let err = backend.client.gen_audios().get(404).await.unwrap_err();
    assert!(err.is_not_found());

    let err = backend.client.roles().delete(1).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 403, ref message } if message == "Forbidden"));

    // Non-401 failures leave the session alone.
    assert!(backend.session.is_authenticated());
    assert!(backend.history.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_empty_success_body() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    Mock::given(method("PUT"))
        .and(path(TestBackend::api("user_corrections/5")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend.server)
        .await;

    let updated = backend
        .client
        .user_corrections()
        .update(5, &json!({"corrected_content": "fixed"}))
        .await?;
    assert!(updated.is_null());

    Ok(())
}

#[tokio::test]
async fn test_resource_by_path() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    Mock::given(method("GET"))
        .and(path(TestBackend::api("stable_diffusion_params/2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"steps": 30})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let resource = backend.client.resource("/stable_diffusion_params/");
    assert_eq!(resource.path(), "stable_diffusion_params");
    assert_eq!(resource.get(2).await?["steps"], 30);

    let headers = backend.authorization_headers().await;
    assert_eq!(headers, vec![Some("Bearer access-1".to_string())]);

    Ok(())
}

#[test]
fn test_authorization_defaults_to_session() {
    assert_eq!(Authorization::default(), Authorization::Session);
}

/// Expect exactly one `verb` request to `endpoint` carrying `body`.
async fn expect_body(backend: &TestBackend, verb: &str, endpoint: &str, body: Value) {
    Mock::given(method(verb))
        .and(path(TestBackend::api(endpoint)))
        .and(body_json(body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn test_translation_bodies() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    expect_body(
        &backend,
        "POST",
        "machine_translations",
        json!({
            "chapter_id": 4,
            "translated_content": "Hola",
            "source_language": "en",
            "target_language": "es",
            "translation_engine": "ollama"
        }),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "user_corrections",
        json!({"machine_translation_id": 1, "corrected_content": "Hola!"}),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "convert_histories",
        json!({
            "chapter_id": 4,
            "target_language_id": 2,
            "is_translated": true,
            "is_audio_generated": false,
            "is_video_generated": false
        }),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "supports",
        json!({"language_code": "es", "language_name": "Spanish"}),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "novel_styles",
        json!({"name": "Noir"}),
    )
    .await;

    let client = &backend.client;
    client
        .machine_translations()
        .create(&CreateMachineTranslation {
            chapter_id: 4,
            translated_content: "Hola".to_string(),
            source_language: "en".to_string(),
            target_language: "es".to_string(),
            translation_engine: "ollama".to_string(),
        })
        .await?;
    client
        .user_corrections()
        .create(&CreateUserCorrection {
            machine_translation_id: 1,
            corrected_content: "Hola!".to_string(),
        })
        .await?;
    client
        .convert_histories()
        .create(&CreateConvertHistory {
            chapter_id: 4,
            target_language_id: 2,
            is_translated: true,
            is_audio_generated: false,
            is_video_generated: false,
        })
        .await?;
    client
        .supports()
        .create(&CreateSupport {
            language_code: "es".to_string(),
            language_name: "Spanish".to_string(),
        })
        .await?;
    client
        .novel_styles()
        .create(&CreateStyle {
            name: "Noir".to_string(),
            description: None,
        })
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_media_generation_bodies() -> Result<()> {
    let backend = TestBackend::logged_in(&[]).await?;
    expect_body(
        &backend,
        "POST",
        "audio_styles",
        json!({"language_code_id": 2, "style_name": "calm", "voice_type": "female"}),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "gen_audios",
        json!({"chapter_id": 4, "audio_style_id": 1, "speech_rate": "+0%"}),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "gen_imgs",
        json!({"chapter_id": 4, "num_segments": 3, "sd_id": 2}),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "gen_videos",
        json!({"chapter_id": 4, "video_url": "/media/4.mp4", "language_code": "es"}),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "ollama_prompts",
        json!({"prompt_type": "scene", "prompt_text": "Describe the scene"}),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "stable_diffusion_params",
        json!({"ollama_prompt_id": 1, "steps": 30}),
    )
    .await;

    let client = &backend.client;
    client
        .audio_styles()
        .create(&CreateAudioStyle {
            language_code_id: 2,
            style_name: "calm".to_string(),
            voice_type: "female".to_string(),
        })
        .await?;
    client
        .gen_audios()
        .create(&CreateGenAudio {
            chapter_id: 4,
            audio_style_id: 1,
            speech_rate: "+0%".to_string(),
        })
        .await?;
    client
        .gen_images()
        .create(&CreateGenImage {
            chapter_id: 4,
            num_segments: 3,
            sd_id: 2,
        })
        .await?;
    client
        .gen_videos()
        .create(&CreateGenVideo {
            chapter_id: 4,
            video_url: "/media/4.mp4".to_string(),
            language_code: "es".to_string(),
        })
        .await?;
    client
        .ollama_prompts()
        .create(&CreateOllamaPrompt {
            prompt_type: "scene".to_string(),
            prompt_text: "Describe the scene".to_string(),
        })
        .await?;
    client
        .stable_diffusion_params()
        .create(&CreateStableDiffusionParam {
            ollama_prompt_id: 1,
            steps: Some(30),
            ..Default::default()
        })
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_user_and_reader_bodies() -> Result<()> {
    let backend = TestBackend::logged_in(&["admin"]).await?;
    expect_body(
        &backend,
        "POST",
        "users",
        json!({"username": "bob", "email": "bob@example.com", "password": "pw"}),
    )
    .await;
    expect_body(
        &backend,
        "PUT",
        "users/7",
        json!({"username": "bobby", "email": "bob@example.com"}),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "roles",
        json!({"name": "editor", "description": "Edits novels"}),
    )
    .await;
    expect_body(
        &backend,
        "POST",
        "comments",
        json!({"chapter_id": 4, "user_id": 7, "content": "Great chapter"}),
    )
    .await;
    expect_body(&backend, "POST", "user_collects", json!({"novel_id": 3, "user_id": 7})).await;
    expect_body(&backend, "POST", "user_likes", json!({"novel_id": 3, "user_id": 7})).await;

    let client = &backend.client;
    client
        .users()
        .create(&CreateUser {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await?;
    client
        .users()
        .update(
            7,
            &UpdateUser {
                username: "bobby".to_string(),
                email: "bob@example.com".to_string(),
            },
        )
        .await?;
    client
        .roles()
        .create(&CreateRole {
            name: "editor".to_string(),
            description: "Edits novels".to_string(),
        })
        .await?;
    client
        .comments()
        .create(&CreateComment {
            chapter_id: 4,
            user_id: 7,
            content: "Great chapter".to_string(),
        })
        .await?;
    let mark = NovelMark {
        novel_id: 3,
        user_id: 7,
    };
    client.user_collects().create(&mark).await?;
    client.user_likes().create(&mark).await?;

    Ok(())
}
