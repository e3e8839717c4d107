use stowage_arm::blob::{parse_container_names, string_to_sign, BlobServiceClient};

#[test]
fn string_to_sign_for_list_containers() {
    let s = string_to_sign(
        "GET",
        &[
            ("x-ms-version", "2015-04-05"),
            ("x-ms-date", "Fri, 26 Jun 2015 23:39:12 GMT"),
        ],
        "myaccount",
        "/",
        &[("maxresults", "1"), ("comp", "list")],
    );

    assert_eq!(
        s,
        "GET\n\n\n\n\n\n\n\n\n\n\n\n\
         x-ms-date:Fri, 26 Jun 2015 23:39:12 GMT\n\
         x-ms-version:2015-04-05\n\
         /myaccount/\n\
         comp:list\n\
         maxresults:1"
    );
}

#[test]
fn container_names_are_extracted() {
    let body = r#"<?xml version="1.0" encoding="utf-8"?>
<EnumerationResults ServiceEndpoint="https://myaccount.blob.core.windows.net/">
  <MaxResults>1</MaxResults>
  <Containers>
    <Container>
      <Name>vhds</Name>
      <Properties><Etag>0x8D2</Etag></Properties>
    </Container>
    <Container>
      <Name>backups</Name>
    </Container>
  </Containers>
  <NextMarker>/myaccount/data</NextMarker>
</EnumerationResults>"#;

    assert_eq!(parse_container_names(body), vec!["vhds", "backups"]);
}

#[test]
fn empty_listing_has_no_containers() {
    let body = r#"<?xml version="1.0" encoding="utf-8"?>
<EnumerationResults ServiceEndpoint="https://myaccount.blob.core.windows.net/">
  <Containers />
  <NextMarker />
</EnumerationResults>"#;

    assert!(parse_container_names(body).is_empty());
}

#[test]
fn client_rejects_non_base64_key() {
    assert!(BlobServiceClient::new("myaccount", "not base64!", "core.windows.net").is_err());
    assert!(BlobServiceClient::new("myaccount", "c2VjcmV0", "core.windows.net").is_ok());
}
