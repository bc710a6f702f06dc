use press_impose::*;

fn table() -> MetadataTable {
    let mut table = MetadataTable::new();
    let mut book = ProductMetadata::new(2, 2, (400.0, 600.0));
    book.id_text = Some("<order_item_id> <page>".to_string());
    table.insert("B", book);

    let mut card = ProductMetadata::new(3, 3, (200.0, 280.0));
    card.orientation = Orientation::West;
    card.barcode = Some(BarcodeSite {
        face: SheetFace::Front,
        vertical: true,
        pos: None,
    });
    table.insert("K", card);
    table
}

#[test]
fn test_unknown_product_code_is_fatal() {
    let table = table();
    let result = table.get(&ProductCode::new("Z"));
    assert!(matches!(result, Err(ImposeError::UnknownProduct(code)) if code == "Z"));
}

#[test]
fn test_for_jobs_infers_type_from_first_job() {
    let table = table();
    let jobs = vec![JobDescriptor::new(1, "K", "cards.pdf", 2, 10)];
    let meta = table.for_jobs(&jobs, None).unwrap();
    assert_eq!(meta.orientation, Orientation::West);

    // explicit type wins over the job's code
    let meta = table.for_jobs(&jobs, Some(&ProductCode::new("B"))).unwrap();
    assert_eq!(meta.rows, 2);
}

#[test]
fn test_for_jobs_requires_a_code() {
    let table = table();
    let jobs = vec![JobDescriptor::new(1, "", "cards.pdf", 2, 10)];
    assert!(matches!(
        table.for_jobs(&jobs, None),
        Err(ImposeError::Config(_))
    ));
    assert!(matches!(
        table.for_jobs(&[], None),
        Err(ImposeError::NoPages)
    ));
}

#[test]
fn test_validate_rejects_degenerate_grids() {
    let mut meta = ProductMetadata::new(0, 2, (400.0, 600.0));
    assert!(meta.validate().is_err());
    meta.rows = 2;
    assert!(meta.validate().is_ok());
    meta.page_size = (0.0, 600.0);
    assert!(meta.validate().is_err());
}

#[tokio::test]
async fn test_table_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("impmeta.json");

    let table = table();
    table.save(&path).await.unwrap();
    let loaded = MetadataTable::load(&path).await.unwrap();
    assert_eq!(loaded, table);
    assert_eq!(
        loaded.get(&ProductCode::new("K")).unwrap().orientation,
        Orientation::West
    );
}

#[tokio::test]
async fn test_load_rejects_invalid_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("impmeta.json");
    tokio::fs::write(&path, r#"{"B": {"rows": 0, "cols": 2}}"#)
        .await
        .unwrap();
    assert!(matches!(
        MetadataTable::load(&path).await,
        Err(ImposeError::Config(_))
    ));
}
