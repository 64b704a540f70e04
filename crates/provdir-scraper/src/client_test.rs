use super::*;

#[test]
fn extract_domain_strips_scheme() {
    assert_eq!(
        extract_domain("https://www.sharecare.com"),
        "www.sharecare.com"
    );
    assert_eq!(extract_domain("http://127.0.0.1:8080/x"), "127.0.0.1");
}

#[test]
fn extract_domain_handles_path_and_query() {
    assert_eq!(
        extract_domain("https://www.sharecare.com/find-a-doctor/search?pageNum=2"),
        "www.sharecare.com"
    );
}

#[test]
fn extract_domain_fallback_no_scheme() {
    assert_eq!(extract_domain("sharecare.com"), "sharecare.com");
}

#[test]
fn client_builds_with_zero_retries() {
    let client = DirectoryClient::new(5, "provdir-test/0.1", 0, 0);
    assert!(client.is_ok());
}
