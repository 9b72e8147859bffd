//! Mirror link resolution
//!
//! Builds the ordered download/mirror list for a detail view from the
//! reconciled record and the direct links returned by the download service.
//! Only string templating happens here; targets are never checked.

use crate::models::{BookRecord, MirrorLink, MirrorSource};

pub const ANNAS_ARCHIVE_URL: &str = "https://annas-archive.org/md5";
pub const LIBGEN_URL: &str = "https://libgen.li/get.php";
pub const IPFS_GATEWAY_URL: &str = "https://gateway-ipfs.st/ipfs";

/// Ordered links: direct links in server order, then the two catalog
/// mirrors when the record has a linkable id, then the gateway link when it
/// has a distributed storage reference.
pub fn resolve_mirror_links(record: &BookRecord, direct_links: &[String]) -> Vec<MirrorLink> {
    let mut links: Vec<MirrorLink> = Vec::new();

    let direct = direct_links
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty());
    for (i, url) in direct.enumerate() {
        links.push(MirrorLink {
            label: format!("Download {}", i + 1),
            url: url.to_string(),
            priority: 0,
            source: MirrorSource::Direct,
            primary: i == 0,
        });
    }

    if let Some(id) = record.linkable_id() {
        links.push(MirrorLink {
            label: "Anna's Archive".to_string(),
            url: format!("{}/{}", ANNAS_ARCHIVE_URL, urlencoding::encode(id)),
            priority: 0,
            source: MirrorSource::Catalog,
            primary: false,
        });
        links.push(MirrorLink {
            label: "Libgen.li".to_string(),
            url: format!("{}?md5={}", LIBGEN_URL, urlencoding::encode(id)),
            priority: 0,
            source: MirrorSource::Catalog,
            primary: false,
        });
    }

    if let Some(cid) = record
        .distributed_storage_ref
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        links.push(MirrorLink {
            label: "IPFS Mirror".to_string(),
            url: gateway_url(cid, record),
            priority: 0,
            source: MirrorSource::Gateway,
            primary: false,
        });
    }

    for (priority, link) in links.iter_mut().enumerate() {
        link.priority = priority as u32;
    }
    links
}

/// Gateway URL with a `title_author_liber3.ext` filename hint
fn gateway_url(cid: &str, record: &BookRecord) -> String {
    let filename = format!(
        "{}_{}_liber3.{}",
        record.title, record.author, record.extension
    );
    format!(
        "{}/{}?filename={}",
        IPFS_GATEWAY_URL,
        cid,
        urlencoding::encode(&filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_without_id() -> BookRecord {
        let mut record = BookRecord::with_id("");
        record.positional_id = true;
        record
    }

    #[test]
    fn test_nothing_to_link() {
        assert!(resolve_mirror_links(&record_without_id(), &[]).is_empty());
        assert!(resolve_mirror_links(&record_without_id(), &["  ".to_string()]).is_empty());
    }

    #[test]
    fn test_id_only_gives_two_catalog_mirrors() {
        let links = resolve_mirror_links(&BookRecord::with_id("abc123"), &[]);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://annas-archive.org/md5/abc123");
        assert_eq!(links[1].url, "https://libgen.li/get.php?md5=abc123");
        assert!(links.iter().all(|l| l.source == MirrorSource::Catalog));
        assert!(links.iter().all(|l| !l.primary));
    }

    #[test]
    fn test_full_ordering() {
        let mut record = BookRecord::with_id("abc123");
        record.distributed_storage_ref = Some("bafykbzace".to_string());
        let direct = vec![
            "https://dl.example/one".to_string(),
            "https://dl.example/two".to_string(),
        ];

        let links = resolve_mirror_links(&record, &direct);
        let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Download 1",
                "Download 2",
                "Anna's Archive",
                "Libgen.li",
                "IPFS Mirror"
            ]
        );
        assert_eq!(links[0].url, "https://dl.example/one");
        assert_eq!(links[1].url, "https://dl.example/two");
        assert!(links[0].primary);
        assert!(!links[1].primary);
        let priorities: Vec<u32> = links.iter().map(|l| l.priority).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_positional_id_gets_no_catalog_mirrors() {
        let mut record = record_without_id();
        record.id = "7".to_string();
        record.distributed_storage_ref = Some("bafy".to_string());
        let links = resolve_mirror_links(&record, &[]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].source, MirrorSource::Gateway);
    }

    #[test]
    fn test_gateway_filename_hint() {
        let mut record = BookRecord::with_id("abc");
        record.title = "Martin Eden".to_string();
        record.author = "Jack London".to_string();
        record.extension = "epub".to_string();
        record.distributed_storage_ref = Some("bafy42".to_string());

        let links = resolve_mirror_links(&record, &[]);
        assert_eq!(
            links[2].url,
            "https://gateway-ipfs.st/ipfs/bafy42?filename=Martin%20Eden_Jack%20London_liber3.epub"
        );
    }
}
