
use crate::detector::PaginationDetector;
use crate::results::{PageInfo, PaginationResult};
use crate::scan::ScanEvent;

fn plain(value: i32) -> ScanEvent {
    ScanEvent::plain(value)
}

fn link(value: i32, url: &str) -> ScanEvent {
    ScanEvent::link(value, url)
}

fn boundary() -> ScanEvent {
    ScanEvent::Boundary
}

fn detect(events: &[ScanEvent], doc_url: &str) -> PaginationResult {
    PaginationDetector::default().detect_events(events, doc_url)
}

fn page_urls(result: &PaginationResult) -> Vec<(i32, &str)> {
    result.pages.iter().map(|page: &PageInfo| (page.page_num, page.url.as_str())).collect()
}
