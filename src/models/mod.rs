use serde::{Deserialize, Serialize};

pub mod profile;
pub mod shelf;

pub use profile::{ReadingProfile, Recommendations, Signal};
pub use shelf::{Collection, ShelfStats};

/// A book as stored on a shelf and returned to the client
///
/// Only `id`, `title`, `authors`, `categories` and `isbn` take part in identity
/// matching; the remaining fields are descriptive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub ratings_count: u32,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub language: String,
}

// ============================================================================
// Google Books API Types
// ============================================================================

const UNKNOWN_TITLE: &str = "Unknown title";
const UNKNOWN_AUTHOR: &str = "Unknown author";
const NO_DESCRIPTION: &str = "No description available";
const UNKNOWN_LANGUAGE: &str = "unknown";

/// Google sometimes sends `""` where a field is missing
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Raw response from GET /volumes
#[derive(Debug, Clone, Deserialize, Default)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Option<Vec<VolumeItem>>,
}

/// A single volume, as returned by search and by GET /volumes/{id}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeItem {
    pub id: String,
    #[serde(default)]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    pub categories: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub image_links: Option<ImageLinks>,
    pub published_date: Option<String>,
    pub publisher: Option<String>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub id_type: String,
    pub identifier: String,
}

/// Picks ISBN-13 when present, otherwise ISBN-10
fn extract_isbn(identifiers: Option<&[IndustryIdentifier]>) -> Option<String> {
    let identifiers = identifiers?;
    let find = |kind: &str| {
        identifiers
            .iter()
            .find(|id| id.id_type == kind)
            .map(|id| id.identifier.clone())
    };

    find("ISBN_13").or_else(|| find("ISBN_10"))
}

impl From<VolumeItem> for Book {
    fn from(item: VolumeItem) -> Self {
        let info = item.volume_info.unwrap_or_default();
        let links = info.image_links.unwrap_or_default();

        let thumbnail = links
            .thumbnail
            .clone()
            .or_else(|| links.small_thumbnail.clone())
            .unwrap_or_default();
        let cover_image = links
            .large
            .or(links.medium)
            .or(links.thumbnail)
            .unwrap_or_default();

        Book {
            id: item.id,
            title: non_empty(info.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            authors: info
                .authors
                .unwrap_or_else(|| vec![UNKNOWN_AUTHOR.to_string()]),
            description: non_empty(info.description)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            page_count: info.page_count.unwrap_or(0),
            categories: info.categories.unwrap_or_default(),
            average_rating: info.average_rating.unwrap_or(0.0),
            ratings_count: info.ratings_count.unwrap_or(0),
            thumbnail,
            cover_image,
            published_date: info.published_date.unwrap_or_default(),
            publisher: info.publisher.unwrap_or_default(),
            isbn: extract_isbn(info.industry_identifiers.as_deref()),
            language: non_empty(info.language)
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_item_deserialization() {
        let json = r#"{
            "id": "zyTCAlFPjgYC",
            "volumeInfo": {
                "title": "The Google Story",
                "authors": ["David A. Vise", "Mark Malseed"],
                "pageCount": 207,
                "categories": ["Browsers (Computer programs)"],
                "averageRating": 3.5,
                "ratingsCount": 136,
                "imageLinks": {
                    "smallThumbnail": "http://books.google.com/small",
                    "thumbnail": "http://books.google.com/thumb"
                },
                "industryIdentifiers": [
                    {"type": "ISBN_10", "identifier": "055380457X"},
                    {"type": "ISBN_13", "identifier": "9780553804577"}
                ],
                "language": "en"
            }
        }"#;

        let item: VolumeItem = serde_json::from_str(json).unwrap();
        let book = Book::from(item);

        assert_eq!(book.id, "zyTCAlFPjgYC");
        assert_eq!(book.title, "The Google Story");
        assert_eq!(book.authors, vec!["David A. Vise", "Mark Malseed"]);
        assert_eq!(book.page_count, 207);
        assert_eq!(book.isbn, Some("9780553804577".to_string()));
        assert_eq!(book.thumbnail, "http://books.google.com/thumb");
        assert_eq!(book.cover_image, "http://books.google.com/thumb");
        assert_eq!(book.language, "en");
    }

    #[test]
    fn test_volume_without_info_gets_defaults() {
        let item = VolumeItem {
            id: "abc".to_string(),
            volume_info: None,
        };

        let book = Book::from(item);
        assert_eq!(book.id, "abc");
        assert_eq!(book.title, "Unknown title");
        assert_eq!(book.authors, vec!["Unknown author"]);
        assert_eq!(book.description, "No description available");
        assert_eq!(book.page_count, 0);
        assert!(book.categories.is_empty());
        assert_eq!(book.average_rating, 0.0);
        assert_eq!(book.thumbnail, "");
        assert_eq!(book.cover_image, "");
        assert_eq!(book.isbn, None);
        assert_eq!(book.language, "unknown");
    }

    #[test]
    fn test_empty_strings_get_defaults() {
        let json = r#"{
            "id": "blank",
            "volumeInfo": {
                "title": "",
                "authors": ["Anon"],
                "description": "",
                "language": ""
            }
        }"#;

        let book = Book::from(serde_json::from_str::<VolumeItem>(json).unwrap());
        assert_eq!(book.title, "Unknown title");
        assert_eq!(book.authors, vec!["Anon"]);
        assert_eq!(book.description, "No description available");
        assert_eq!(book.language, "unknown");
    }

    #[test]
    fn test_isbn_10_used_when_no_isbn_13() {
        let identifiers = vec![
            IndustryIdentifier {
                id_type: "OTHER".to_string(),
                identifier: "OCLC:1234".to_string(),
            },
            IndustryIdentifier {
                id_type: "ISBN_10".to_string(),
                identifier: "0261103342".to_string(),
            },
        ];

        assert_eq!(
            extract_isbn(Some(identifiers.as_slice())),
            Some("0261103342".to_string())
        );
        assert_eq!(extract_isbn(None), None);
    }

    #[test]
    fn test_cover_prefers_large_then_medium() {
        let item = VolumeItem {
            id: "x".to_string(),
            volume_info: Some(VolumeInfo {
                image_links: Some(ImageLinks {
                    thumbnail: None,
                    small_thumbnail: Some("small".to_string()),
                    medium: Some("medium".to_string()),
                    large: Some("large".to_string()),
                }),
                ..Default::default()
            }),
        };

        let book = Book::from(item);
        assert_eq!(book.thumbnail, "small");
        assert_eq!(book.cover_image, "large");
    }

    #[test]
    fn test_book_serializes_camel_case() {
        let book = Book {
            id: "1".to_string(),
            title: "Dune".to_string(),
            page_count: 412,
            ..Default::default()
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["pageCount"], 412);
        assert_eq!(json["coverImage"], "");
        assert!(json["isbn"].is_null());
    }

    #[test]
    fn test_book_deserializes_with_minimal_fields() {
        let book: Book = serde_json::from_str(r#"{"id": "1", "title": "Dune"}"#).unwrap();
        assert_eq!(book.id, "1");
        assert!(book.authors.is_empty());
        assert_eq!(book.isbn, None);
    }
}
