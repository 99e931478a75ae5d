use httpmock::prelude::*;
use serde_json::json;
use sponsor_desk::config::{DatabaseConfig, StorageConfig};
use sponsor_desk::{
    AirtableStore, Capabilities, PanelPhase, S3LogoStore, SponsorPanel, SponsorRepository,
};

fn repository(server: &MockServer) -> SponsorRepository<AirtableStore, S3LogoStore> {
    let records = AirtableStore::new(&DatabaseConfig {
        api_key: "key_test".to_string(),
        base_id: "appBASE".to_string(),
        table_id: "tblSPONSORS".to_string(),
        base_url: Some(server.base_url()),
    });
    let logos = S3LogoStore::new(&StorageConfig {
        region: "eu-west-1".to_string(),
        access_key_id: "AKIATEST".to_string(),
        secret_access_key: "secret".to_string(),
        bucket: "sponsor-logos".to_string(),
        folder: "logos".to_string(),
        endpoint_url: Some(server.base_url()),
    });
    SponsorRepository::new(records, logos, Capabilities::default())
}

fn panel(server: &MockServer) -> SponsorPanel<AirtableStore, S3LogoStore> {
    SponsorPanel::new(repository(server))
}

fn sponsor_records() -> serde_json::Value {
    json!({
        "records": [
            { "id": "rec1", "fields": {
                "sponsor_name": "Acme Corp", "level": "Gold",
                "contact_person": "Dana Vale", "contact_email": "dana@acme.example",
                "contact_phone": "+1-555-0100", "contract_end": "2027-06-30"
            }},
            { "id": "rec2", "fields": {
                "sponsor_name": "Borealis", "level": "Silver",
                "contact_person": "Kim Osei", "contact_email": "kim@borealis.example",
                "contact_phone": "+1-555-0111", "contract_end": "2026-12-31"
            }},
            { "id": "rec3", "fields": {
                "sponsor_name": "Cobalt Works", "level": "Gold",
                "contact_person": "Ada Lin", "contact_email": "ada@cobalt.example",
                "contact_phone": "+1-555-0122", "contract_end": "2027-01-15"
            }}
        ]
    })
}

#[tokio::test]
async fn test_initial_load_groups_sponsors_by_category() {
    let server = MockServer::start();
    // One listing mock serves both the sponsor and the category fetch; the
    // category fetch only narrows the response server-side.
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/appBASE/tblSPONSORS");
        then.status(200).json_body(sponsor_records());
    });

    let mut panel = panel(&server);
    panel.load().await;

    assert_eq!(*panel.phase(), PanelPhase::Loaded);
    // Sponsors and categories are fetched concurrently, one call each.
    list_mock.assert_hits(2);

    assert_eq!(panel.sponsors().len(), 3);
    assert_eq!(panel.categories(), ["Gold", "Silver"]);

    let gold: Vec<&str> = panel
        .sponsors_in("Gold")
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(gold, ["Acme Corp", "Cobalt Works"]);
    assert_eq!(panel.sponsors_in("Silver").len(), 1);
    assert!(panel.sponsors_in("Bronze").is_empty());
}

#[tokio::test]
async fn test_load_failure_leaves_both_lists_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/appBASE/tblSPONSORS");
        then.status(500).body("boom");
    });

    let mut panel = panel(&server);
    panel.load().await;

    assert!(matches!(panel.phase(), PanelPhase::LoadFailed(_)));
    assert!(panel.sponsors().is_empty());
    assert!(panel.categories().is_empty());
    assert!(panel.last_error().is_some());
}

#[tokio::test]
async fn test_successful_mutation_triggers_a_full_reload() {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/appBASE/tblSPONSORS");
        then.status(200).json_body(sponsor_records());
    });
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/appBASE/tblSPONSORS")
            .body_contains("Platinum");
        then.status(200).json_body(json!({
            "records": [ { "id": "recNEW", "fields": { "level": "Platinum" } } ]
        }));
    });

    let mut panel = panel(&server);
    panel.load().await;
    assert_eq!(list_mock.hits(), 2);

    panel.submit_add_category("Platinum").await.unwrap();

    create_mock.assert();
    // The snapshot is rebuilt from a fresh sponsor+category fetch pair, not
    // patched locally.
    assert_eq!(list_mock.hits(), 4);
    assert_eq!(*panel.phase(), PanelPhase::Loaded);
    assert!(panel.last_error().is_none());
}

#[tokio::test]
async fn test_failed_mutation_keeps_the_snapshot_and_surfaces_the_error() {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/appBASE/tblSPONSORS");
        then.status(200).json_body(sponsor_records());
    });
    server.mock(|when, then| {
        when.method(POST).path("/appBASE/tblSPONSORS");
        then.status(422).body("field mismatch");
    });

    let mut panel = panel(&server);
    panel.load().await;
    assert_eq!(list_mock.hits(), 2);

    let err = panel.submit_add_category("Platinum").await.unwrap_err();

    assert!(err.contains("not saved"));
    // No reload happened and the previous snapshot is still shown.
    assert_eq!(list_mock.hits(), 2);
    assert_eq!(*panel.phase(), PanelPhase::Idle);
    assert_eq!(panel.sponsors().len(), 3);
    assert_eq!(panel.last_error(), Some(err.as_str()));
}

#[tokio::test]
async fn test_delete_category_cascades_to_matching_records_only() {
    let server = MockServer::start();
    // The cascade resolves ids with a server-side level filter; only the
    // three Gold records come back, Silver ones are never touched.
    let resolve_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/appBASE/tblSPONSORS")
            .query_param("filterByFormula", "{level} = 'Gold'");
        then.status(200).json_body(json!({
            "records": [
                { "id": "g1", "fields": { "level": "Gold" } },
                { "id": "g2", "fields": { "level": "Gold" } },
                { "id": "g3", "fields": { "level": "Gold" } }
            ]
        }));
    });
    let destroy_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/appBASE/tblSPONSORS")
            .query_param("records[]", "g1")
            .query_param("records[]", "g2")
            .query_param("records[]", "g3");
        then.status(200).json_body(json!({ "records": [] }));
    });

    repository(&server).delete_category("Gold").await.unwrap();

    resolve_mock.assert();
    // One batch delete naming exactly the three Gold records.
    destroy_mock.assert();
}

#[tokio::test]
async fn test_delete_category_with_no_matches_completes_without_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/appBASE/tblSPONSORS");
        then.status(200).json_body(json!({ "records": [] }));
    });
    let destroy_mock = server.mock(|when, then| {
        when.method(DELETE).path("/appBASE/tblSPONSORS");
        then.status(200);
    });

    repository(&server).delete_category("Bronze").await.unwrap();

    destroy_mock.assert_hits(0);
}
