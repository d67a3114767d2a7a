//! Content the interaction layer consumes from the CMS: list items,
//! their preview images and the navigation settings.

use serde::{Deserialize, Serialize};

/// Which collection a list shows.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentKind {
    #[default]
    Blog,
    #[serde(alias = "Project")]
    Projects,
}

impl ContentKind {
    pub fn url_prefix(self) -> &'static str {
        match self {
            ContentKind::Blog => "/blog",
            ContentKind::Projects => "/projects",
        }
    }
}

/// Image served by the CMS image CDN.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Query parameters understood by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageParams {
    pub crop: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub exposure: Option<i32>,
    pub quality: Option<u8>,
}

impl ImageParams {
    /// Cropped thumbnail shown inside each list row.
    pub const LIST_THUMBNAIL: ImageParams = ImageParams {
        crop: true,
        width: Some(220),
        height: Some(120),
        exposure: None,
        quality: None,
    };

    fn query(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if self.crop {
            parts.push("fit=crop".to_string());
        }
        if let Some(w) = self.width {
            parts.push(format!("w={w}"));
        }
        if let Some(h) = self.height {
            parts.push(format!("h={h}"));
        }
        if let Some(exp) = self.exposure {
            parts.push(format!("exp={exp}"));
        }
        if let Some(q) = self.quality {
            parts.push(format!("q={q}"));
        }
        parts
    }
}

impl ImageRef {
    /// An image field counts as filled when it carries a URL.
    pub fn is_filled(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// URL with CDN parameters appended.
    pub fn src(&self, params: &ImageParams) -> String {
        let query = params.query();
        if query.is_empty() {
            return self.url.clone();
        }
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, sep, query.join("&"))
    }
}

/// A blog post or project as listed on an index page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Unique slug.
    pub uid: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<ImageRef>,
    /// ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
}

impl ContentItem {
    /// Items without a title are not rendered, and so never hovered.
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn publish_date(&self) -> Option<String> {
        self.date.as_deref().and_then(format_publish_date)
    }
}

pub const DEFAULT_VIEW_MORE_TEXT: &str = "Read More";

/// An index of content items with the list's presentation settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentList {
    #[serde(default)]
    pub kind: ContentKind,
    #[serde(default)]
    pub items: Vec<ContentItem>,
    #[serde(default)]
    pub view_more_text: Option<String>,
    #[serde(default)]
    pub fallback_image: Option<ImageRef>,
}

impl ContentList {
    pub fn view_more_text(&self) -> &str {
        self.view_more_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_VIEW_MORE_TEXT)
    }

    pub fn href(&self, item: &ContentItem) -> String {
        format!("{}/{}", self.kind.url_prefix(), item.uid)
    }

    /// Rendered items paired with their index in `items`.
    /// Hover indices refer to the latter.
    pub fn visible_items(&self) -> impl Iterator<Item = (usize, &ContentItem)> {
        self.items.iter().enumerate().filter(|(_, item)| item.has_title())
    }

    pub fn item(&self, index: usize) -> Option<&ContentItem> {
        self.items.get(index).filter(|item| item.has_title())
    }

    /// The item's cover image, or the list fallback when the cover is empty.
    pub fn preview_image<'a>(&'a self, item: &'a ContentItem) -> Option<&'a ImageRef> {
        item.cover_image
            .as_ref()
            .filter(|img| img.is_filled())
            .or_else(|| self.fallback_image.as_ref().filter(|img| img.is_filled()))
    }

    /// Preview URL per item index (`None` for unrendered or imageless items).
    pub fn preview_sources(&self, params: &ImageParams) -> Vec<Option<String>> {
        self.items
            .iter()
            .map(|item| {
                if !item.has_title() {
                    return None;
                }
                self.preview_image(item).map(|img| img.src(params))
            })
            .collect()
    }
}

/// A navigation entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub link: String,
}

/// Site-wide navigation settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NavSettings {
    pub name: String,
    #[serde(default)]
    pub nav_items: Vec<NavLink>,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
}

impl NavSettings {
    /// Whether `link` should be marked as the current page for `pathname`.
    pub fn is_current(link: &str, pathname: &str) -> bool {
        !link.is_empty() && pathname.contains(link)
    }

    /// Label of the first entry that matches `pathname`.
    pub fn current_label(&self, pathname: &str) -> Option<&str> {
        self.nav_items
            .iter()
            .find(|item| Self::is_current(&item.link, pathname))
            .map(|item| item.label.as_str())
    }
}

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Day of week, 0 = Sunday (Sakamoto's method).
fn weekday(year: i32, month: u32, day: u32) -> usize {
    const T: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year - 1 } else { year };
    let t = usize::try_from(month.saturating_sub(1))
        .ok()
        .and_then(|m| T.get(m).copied())
        .unwrap_or(0);
    let d = i32::try_from(day).unwrap_or(0);
    let w = (y + y / 4 - y / 100 + y / 400 + t + d).rem_euclid(7);
    usize::try_from(w).unwrap_or(0)
}

/// Format an ISO date (`YYYY-MM-DD`) as "Weekday, Month D, YYYY".
/// Returns `None` for anything that is not a real calendar date.
pub fn format_publish_date(date: &str) -> Option<String> {
    let mut parts = date.trim().splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.get(..2)?.parse().ok()?;
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return None;
    }
    let month_name = MONTHS.get(usize::try_from(month - 1).ok()?)?;
    let weekday_name = WEEKDAYS.get(weekday(year, month, day))?;
    Some(format!("{weekday_name}, {month_name} {day}, {year}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(uid: &str, title: Option<&str>, cover: Option<&str>) -> ContentItem {
        ContentItem {
            uid: uid.to_string(),
            title: title.map(str::to_string),
            tags: vec!["Rust".to_string()],
            cover_image: cover.map(|url| ImageRef {
                url: url.to_string(),
                alt: None,
            }),
            date: None,
        }
    }

    #[test]
    fn test_href_uses_kind_prefix() {
        let mut list = ContentList::default();
        let post = item("hello", Some("Hello"), None);
        assert_eq!(list.href(&post), "/blog/hello");
        list.kind = ContentKind::Projects;
        assert_eq!(list.href(&post), "/projects/hello");
    }

    #[test]
    fn test_view_more_default() {
        let mut list = ContentList::default();
        assert_eq!(list.view_more_text(), "Read More");
        list.view_more_text = Some("View Project".to_string());
        assert_eq!(list.view_more_text(), "View Project");
    }

    #[test]
    fn test_untitled_items_are_skipped_but_keep_indices() {
        let list = ContentList {
            items: vec![
                item("a", Some("A"), None),
                item("b", None, None),
                item("c", Some("  "), None),
                item("d", Some("D"), None),
            ],
            ..ContentList::default()
        };
        let indices: Vec<usize> = list.visible_items().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 3]);
        assert!(list.item(1).is_none());
        assert!(list.item(3).is_some());
    }

    #[test]
    fn test_preview_of_item_outside_list() {
        let list = ContentList {
            fallback_image: Some(ImageRef {
                url: "https://img/fallback.png".to_string(),
                alt: None,
            }),
            ..ContentList::default()
        };
        let detached = item("x", Some("X"), Some("https://img/x.png"));
        let image = list.preview_image(&detached).map(|img| img.url.as_str());
        assert_eq!(image, Some("https://img/x.png"));
        let bare = item("y", Some("Y"), None);
        let image = list.preview_image(&bare).map(|img| img.url.as_str());
        assert_eq!(image, Some("https://img/fallback.png"));
    }

    #[test]
    fn test_preview_falls_back() {
        let list = ContentList {
            items: vec![
                item("a", Some("A"), Some("https://img/a.png")),
                item("b", Some("B"), Some("")),
                item("c", None, Some("https://img/c.png")),
            ],
            fallback_image: Some(ImageRef {
                url: "https://img/fallback.png?auto=format".to_string(),
                alt: None,
            }),
            ..ContentList::default()
        };
        let sources = list.preview_sources(&ImageParams {
            crop: true,
            width: Some(220),
            height: Some(320),
            exposure: Some(-10),
            quality: None,
        });
        assert_eq!(
            sources,
            vec![
                Some("https://img/a.png?fit=crop&w=220&h=320&exp=-10".to_string()),
                Some(
                    "https://img/fallback.png?auto=format&fit=crop&w=220&h=320&exp=-10".to_string()
                ),
                None,
            ]
        );
    }

    #[test]
    fn test_nav_current() {
        let settings = NavSettings {
            name: "Site".to_string(),
            nav_items: vec![
                NavLink {
                    label: "Blog".to_string(),
                    link: "/blog".to_string(),
                },
                NavLink {
                    label: "Projects".to_string(),
                    link: "/projects".to_string(),
                },
            ],
            cta_label: None,
            cta_link: None,
        };
        assert_eq!(settings.current_label("/projects/folio"), Some("Projects"));
        assert_eq!(settings.current_label("/about"), None);
        assert!(!NavSettings::is_current("", "/blog"));
    }

    #[test]
    fn test_format_publish_date() {
        assert_eq!(
            format_publish_date("2024-03-15").as_deref(),
            Some("Friday, March 15, 2024")
        );
        assert_eq!(
            format_publish_date("2000-01-01").as_deref(),
            Some("Saturday, January 1, 2000")
        );
        assert_eq!(
            format_publish_date("2024-02-29T10:00:00Z").as_deref(),
            Some("Thursday, February 29, 2024")
        );
        assert_eq!(format_publish_date("2023-02-29"), None);
        assert_eq!(format_publish_date("2023-13-01"), None);
        assert_eq!(format_publish_date("yesterday"), None);
    }
}
