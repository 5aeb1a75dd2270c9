use super::query_pattern;
use crate::filter::PageParamFilter;
use crate::pattern::QueryParamPattern;
use crate::url_view::UrlView;

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn is_paging(url: &str, pattern: &str, name: &str) -> bool {
        query_pattern(pattern, name).is_paging_url(url)
    }

    fn is_valid(doc_url: &str, pattern: &str, name: &str) -> bool {
        query_pattern(pattern, name).is_valid_for(&UrlView::parse(doc_url).unwrap())
    }

    #[test]
    fn test_rejected_parameters() {
        let filter = PageParamFilter::default();
        let url = UrlView::parse("http://www.foo.com/a?page=x&tag=2&=3&p=-1&n=4").unwrap();
        assert!(QueryParamPattern::new(&url, &filter, "page", "x").is_none());
        assert!(QueryParamPattern::new(&url, &filter, "tag", "2").is_none());
        assert!(QueryParamPattern::new(&url, &filter, "", "3").is_none());
        assert!(QueryParamPattern::new(&url, &filter, "p", "-1").is_none());

        let pattern = QueryParamPattern::new(&url, &filter, "n", "4").unwrap();
        assert_eq!(pattern.as_str(), "http://www.foo.com/a?page=x&tag=2&=3&p=-1&n=[*!]");
        assert_eq!(pattern.page_param_value(), 4);
    }

    #[test]
    fn test_middle_parameter() {
        let pattern = "http://www.foo.com/a/b?queryA=v1&queryB=[*!]&queryC=v3";
        assert!(is_paging("http://www.foo.com/a/b?queryA=v1&queryB=4&queryC=v3", pattern, "queryB"));
        assert!(is_paging("http://www.foo.com/a/b?queryA=v1&queryC=v3", pattern, "queryB"));
        assert!(!is_paging("http://www.foo.com/a/b?queryA=v1", pattern, "queryB"));
        assert!(!is_paging("http://www.foo.com/a/b?queryA=v2&queryB=4&queryC=v3", pattern, "queryB"));
    }

    #[test]
    fn test_first_parameter() {
        let pattern = "http://www.foo.com/a/b?queryB=[*!]&queryC=v3";
        assert!(is_paging("http://www.foo.com/a/b?queryB=2&queryC=v3", pattern, "queryB"));
        assert!(is_paging("http://www.foo.com/a/b?queryC=v3", pattern, "queryB"));
        assert!(!is_paging("http://www.foo.com/a/b?queryA=v1&queryC=v3", pattern, "queryB"));
        assert!(!is_paging("http://www.foo.com/a/b?queryB=bar&queryC=v3", pattern, "queryB"));
        assert!(!is_paging("http://www.foo.com/a/b?queryC=v3&queryB=3", pattern, "queryB"));
    }

    #[test]
    fn test_only_parameter() {
        let pattern = "http://www.foo.com/a/b?page=[*!]";
        assert!(is_paging("http://www.foo.com/a/b", pattern, "page"));
        assert!(is_paging("http://www.foo.com/a/b?page=3", pattern, "page"));
        assert!(is_paging("http://www.foo.com/a/b/", pattern, "page"));
        assert!(is_paging("http://www.foo.com/a/b.htm", pattern, "page"));
        assert!(is_paging("http://www.foo.com/a/b.HTML", pattern, "page"));
        assert!(!is_paging("http://www.foo.com/a/b?size=3", pattern, "page"));
        assert!(!is_paging("http://www.foo.com/a/c", pattern, "page"));
    }

    #[test]
    fn test_valid_for_document() {
        assert!(is_valid("http://www.foo.com/forum-12", "http://www.foo.com/forum-12?page=[*!]", "page"));
        assert!(is_valid(
            "http://www.foo.com/forum-12?sid=12345",
            "http://www.foo.com/forum-12?page=[*!]&sort=d",
            "page"
        ));
        assert!(is_valid("http://www.foo.com/Forum-12/", "http://www.foo.com/forum-12?page=[*!]", "page"));

        assert!(!is_valid("http://www.foo.com/a/forum-12", "http://www.foo.com/b/forum-12?page=[*!]", "page"));
        assert!(!is_valid("http://www.foo.com/forum-11", "http://www.foo.com/forum-12?page=[*!]", "page"));
    }
}
