use press_impose::*;
use std::sync::Arc;

fn book_metadata() -> ProductMetadata {
    let mut meta = ProductMetadata::new(2, 2, (400.0, 600.0));
    meta.id_text = Some("<order_item_id> <page>/<pages>".to_string());
    meta.page_bounds = Some((2, 101));
    meta
}

fn book_job(pages: u32) -> JobDescriptor {
    JobDescriptor::new(1234, "B", "book.pdf", pages, 1)
}

fn build(jobs: Vec<JobDescriptor>, meta: &ProductMetadata) -> BuiltPages {
    let jobs: Vec<Arc<JobDescriptor>> = jobs.into_iter().map(Arc::new).collect();
    build_page_list(&jobs, meta).unwrap()
}

fn content_index(page: &LogicalPage) -> Option<u32> {
    match page.kind {
        PageKind::Content { index, .. } => Some(index),
        _ => None,
    }
}

#[test]
fn test_full_run_emits_cover_content_and_trailer() {
    // 9 PDF pages: cover + content 1..8, odd count backfills blank+barcode
    let built = build(vec![book_job(9)], &book_metadata());
    let kinds: Vec<&PageKind> = built.pages.iter().map(|p| &p.kind).collect();

    assert_eq!(content_index(&built.pages[0]), Some(0));
    assert_eq!(built.pages[0].label, "cover");
    for p in 1..=8u32 {
        assert_eq!(content_index(&built.pages[p as usize]), Some(p));
    }
    assert_eq!(kinds[9], &PageKind::Blank);
    assert_eq!(kinds[10], &PageKind::LogoBarcode);
    assert_eq!(built.pages.len(), 11);
}

#[test]
fn test_duplex_back_pairing_of_subset() {
    // requesting either side of a leaf pulls in its partner
    let meta = book_metadata();
    let mut front = book_job(8);
    front.page_list = Some(vec![PageRequest::Page(3)]);
    let built = build(vec![front], &meta);
    assert_eq!(content_index(&built.pages[0]), Some(3));
    assert_eq!(content_index(&built.pages[1]), Some(4));

    let mut back = book_job(8);
    back.page_list = Some(vec![PageRequest::Page(4)]);
    let built = build(vec![back], &meta);
    assert_eq!(content_index(&built.pages[0]), Some(3));
    assert_eq!(content_index(&built.pages[1]), Some(4));
}

#[test]
fn test_last_page_back_becomes_barcode() {
    // page 7 of an 8-page PDF pairs with the barcode trailer, not page 8
    let meta = book_metadata();
    let mut job = book_job(8);
    job.page_list = Some(vec![PageRequest::Page(7)]);
    let built = build(vec![job], &meta);
    assert_eq!(content_index(&built.pages[0]), Some(7));
    // even page count, default class: single logo/barcode trailer
    assert_eq!(built.pages[1].kind, PageKind::LogoBarcode);
    assert_eq!(built.pages.len(), 2);
}

#[test]
fn test_cover_subset_scenario() {
    // cover plus pages 1 and 3 of a 4-page duplex book
    let meta = book_metadata();
    let mut job = book_job(4);
    job.page_list = Some(vec![
        PageRequest::Cover,
        PageRequest::Page(1),
        PageRequest::Page(3),
    ]);
    let built = build(vec![job], &meta);
    let kinds: Vec<&PageKind> = built.pages.iter().map(|p| &p.kind).collect();

    assert_eq!(
        kinds[0],
        &PageKind::Cover {
            kind: CoverKind::Cover,
            side: SheetFace::Front
        }
    );
    assert_eq!(
        kinds[1],
        &PageKind::Cover {
            kind: CoverKind::Cover,
            side: SheetFace::Back
        }
    );
    assert_eq!(content_index(&built.pages[2]), Some(1));
    assert_eq!(content_index(&built.pages[3]), Some(2));
    assert_eq!(content_index(&built.pages[4]), Some(3));
    assert_eq!(kinds[5], &PageKind::LogoBarcode);
    assert_eq!(built.pages.len(), 6);
}

#[test]
fn test_cover_requests_move_to_front() {
    let meta = book_metadata();
    let mut job = book_job(8);
    job.page_list = Some(vec![PageRequest::Page(1), PageRequest::Cover]);
    let built = build(vec![job], &meta);
    assert!(built.pages[0].kind.is_front_face());
}

#[test]
fn test_printed_cover_back_products_use_page_one() {
    let meta = book_metadata();
    let mut job = JobDescriptor::new(55, "M", "album.pdf", 10, 1);
    job.page_list = Some(vec![PageRequest::Cover]);
    let built = build(vec![job], &meta);
    assert!(built.pages[0].kind.is_front_face());
    assert_eq!(content_index(&built.pages[1]), Some(1));
    assert_eq!(built.pages[1].source.as_ref().unwrap().page, 2);
    assert_eq!(built.pages.len(), 2);
}

#[test]
fn test_pseudo_simplex_subset_blank_backs() {
    // single-sided content into a duplex binding: explicit blank backs,
    // barcode behind the last page
    let mut meta = book_metadata();
    meta.cover = Some("book-cover".to_string());
    let mut job = JobDescriptor::new(77, "E", "book.pdf", 4, 1);
    job.page_siding = PageSiding::Simplex;
    job.page_list = Some(vec![
        PageRequest::Page(1),
        PageRequest::Page(2),
        PageRequest::Page(3),
    ]);
    let built = build(vec![job], &meta);
    let kinds: Vec<&PageKind> = built.pages.iter().map(|p| &p.kind).collect();

    assert_eq!(content_index(&built.pages[0]), Some(1));
    assert_eq!(kinds[1], &PageKind::Blank);
    assert_eq!(content_index(&built.pages[2]), Some(2));
    assert_eq!(kinds[3], &PageKind::Blank);
    assert_eq!(content_index(&built.pages[4]), Some(3));
    assert_eq!(kinds[5], &PageKind::Barcode);
    assert_eq!(built.pages.len(), 6);
}

#[test]
fn test_pseudo_simplex_full_run_blank_padding() {
    let mut meta = book_metadata();
    meta.cover = Some("book-cover".to_string());
    let mut job = book_job(4);
    job.page_siding = PageSiding::Simplex;
    let built = build(vec![job], &meta);
    let kinds: Vec<&PageKind> = built.pages.iter().map(|p| &p.kind).collect();

    // dedicated cover component: no in-run cover page
    assert_eq!(content_index(&built.pages[0]), Some(1));
    assert_eq!(kinds[1], &PageKind::Blank);
    assert_eq!(content_index(&built.pages[2]), Some(2));
    assert_eq!(kinds[3], &PageKind::Blank);
    // the last content page is backed by the trailer instead
    assert_eq!(content_index(&built.pages[4]), Some(3));
    assert_eq!(kinds[5], &PageKind::LogoBarcode);
}

#[test]
fn test_lone_trailer_readds_last_page() {
    // a bare barcode request on a deluxe book pulls the final content page
    // back in so the barcode lands on its back
    let meta = book_metadata();
    let mut job = JobDescriptor::new(88, "E", "book.pdf", 6, 1);
    job.page_list = Some(vec![PageRequest::Page(3), PageRequest::Barcode]);
    let built = build(vec![job], &meta);

    assert_eq!(content_index(&built.pages[0]), Some(3));
    assert_eq!(content_index(&built.pages[1]), Some(4));
    assert_eq!(content_index(&built.pages[2]), Some(5));
    assert_eq!(built.pages[3].kind, PageKind::Barcode);
}

#[test]
fn test_card_copies_are_labeled_faces() {
    let meta = ProductMetadata::new(3, 3, (200.0, 280.0));
    let mut job = JobDescriptor::new(9, "B", "card.pdf", 2, 3);
    job.batched = true;
    job.no_manifest = true;
    let built = build(vec![job], &meta);

    assert_eq!(built.pages.len(), 6);
    assert_eq!(built.pages[0].label, "1 front");
    assert!(built.pages[0].kind.is_front_face());
    assert_eq!(built.pages[1].label, "1");
    assert_eq!(built.pages[4].label, "3 front");
    assert_eq!(built.pages[5].source.as_ref().unwrap().page, 2);
}

#[test]
fn test_copy_separators_for_large_batched_runs() {
    // 3 copies of a book on a 1x2 grid: each copy is prefixed by a
    // separator/cyan pair
    let mut meta = book_metadata();
    meta.rows = 1;
    meta.cols = 2;
    let mut job = book_job(5);
    job.qty = 3;
    job.batched = true;
    job.no_manifest = true;
    let built = build(vec![job], &meta);

    let separators: Vec<usize> = built
        .pages
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind.is_separator())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(separators.len(), 3);
    for &i in &separators {
        assert_eq!(built.pages[i + 1].kind, PageKind::Cyan);
    }
    match &built.pages[separators[1]].kind {
        PageKind::Separator { label } => assert_eq!(label, "1234 - Copy 2"),
        other => panic!("expected separator, got {:?}", other),
    }
    // batched content carries copy/page counters
    assert!(
        built
            .pages
            .iter()
            .any(|p| p.label == "Copy 2/3 Page 1/5")
    );
}

#[test]
fn test_batched_manifest_is_front_sheet() {
    let meta = book_metadata();
    let mut job = book_job(5);
    job.batched = true;
    let built = build(vec![job], &meta);
    assert_eq!(
        built.front_sheet.as_ref().map(|p| &p.kind),
        Some(&PageKind::Manifest)
    );
}

#[test]
fn test_work_order_becomes_front_sheet_without_manifest() {
    let mut meta = book_metadata();
    meta.work_order = true;
    let mut job = book_job(5);
    job.work_order_source = Some("B1234-workorder.pdf".into());
    let built = build(vec![job], &meta);

    assert_eq!(
        built.front_sheet.as_ref().map(|p| &p.kind),
        Some(&PageKind::WorkOrder)
    );
    assert_eq!(built.work_orders.len(), 1);
    assert!(!built.pages.iter().any(|p| p.kind == PageKind::WorkOrder));
}

#[test]
fn test_work_order_joins_list_when_manifest_present() {
    let mut meta = book_metadata();
    meta.work_order = true;
    let mut job = book_job(5);
    job.batched = true;
    job.work_order_source = Some("B1234-workorder.pdf".into());
    let built = build(vec![job], &meta);

    assert_eq!(
        built.front_sheet.as_ref().map(|p| &p.kind),
        Some(&PageKind::Manifest)
    );
    assert_eq!(built.pages[0].kind, PageKind::WorkOrder);
    assert_eq!(built.pages[1].kind, PageKind::Cyan);
}

#[test]
fn test_missing_work_order_source_is_fatal() {
    let mut meta = book_metadata();
    meta.work_order = true;
    let jobs = vec![Arc::new(book_job(5))];
    let result = build_page_list(&jobs, &meta);
    assert!(matches!(
        result,
        Err(ImposeError::Content { job: 1234, .. })
    ));
}

#[test]
fn test_page_bounds_violations_name_the_job() {
    let meta = book_metadata();
    let jobs = vec![Arc::new(book_job(1))];
    match build_page_list(&jobs, &meta) {
        Err(ImposeError::Content { job, reason }) => {
            assert_eq!(job, 1234);
            assert!(reason.contains("too few"));
        }
        other => panic!("expected content error, got {:?}", other),
    }

    let jobs = vec![Arc::new(book_job(200))];
    assert!(matches!(
        build_page_list(&jobs, &meta),
        Err(ImposeError::Content { job: 1234, .. })
    ));
}

#[test]
fn test_unbatched_jobs_impose_single_copy() {
    let meta = book_metadata();
    let mut job = book_job(5);
    job.qty = 10;
    let built = build(vec![job], &meta);
    // cover + 4 content + blank/logo-barcode backfill, once
    assert_eq!(built.pages.len(), 7);
}
