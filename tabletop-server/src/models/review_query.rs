//! Review listing parameters
//!
//! Column and direction are closed enums so the ORDER BY clause is only ever
//! assembled from `&'static str` fragments. The category filter is bound as a
//! query parameter by the repository.

use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Categories that may be filtered on even when absent from the `categories` table.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "strategy",
    "hidden-roles",
    "dexterity",
    "push-your-luck",
    "roll-and-write",
    "deck-building",
    "engine-building",
    "euro game",
    "social deduction",
];

/// Sortable review column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortColumn {
    ReviewId,
    Title,
    ReviewBody,
    Designer,
    ReviewImgUrl,
    Votes,
    Category,
    Owner,
    #[default]
    CreatedAt,
}

impl SortColumn {
    pub const ALL: [SortColumn; 9] = [
        Self::ReviewId,
        Self::Title,
        Self::ReviewBody,
        Self::Designer,
        Self::ReviewImgUrl,
        Self::Votes,
        Self::Category,
        Self::Owner,
        Self::CreatedAt,
    ];

    /// Name as accepted in the `sort_by` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReviewId => "review_id",
            Self::Title => "title",
            Self::ReviewBody => "review_body",
            Self::Designer => "designer",
            Self::ReviewImgUrl => "review_img_url",
            Self::Votes => "votes",
            Self::Category => "category",
            Self::Owner => "owner",
            Self::CreatedAt => "created_at",
        }
    }

    /// Qualified column reference for the listing query (`reviews` aliased as `r`).
    pub fn column(&self) -> &'static str {
        match self {
            Self::ReviewId => "r.review_id",
            Self::Title => "r.title",
            Self::ReviewBody => "r.review_body",
            Self::Designer => "r.designer",
            Self::ReviewImgUrl => "r.review_img_url",
            Self::Votes => "r.votes",
            Self::Category => "r.category",
            Self::Owner => "r.owner",
            Self::CreatedAt => "r.created_at",
        }
    }
}

impl FromStr for SortColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| ValidationError::SortColumn {
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction. Case-sensitive: only `ASC` and `DESC` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(ValidationError::SortOrder {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Requested category filter.
///
/// Whether the slug is acceptable is only fully known against the store, so
/// this type just carries the value; see [`CategoryFilter::is_allow_listed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryFilter(String);

impl CategoryFilter {
    pub fn new(slug: &str) -> Self {
        Self(slug.to_owned())
    }

    /// True when the slug is in the static allow-list.
    pub fn is_allow_listed(&self) -> bool {
        KNOWN_CATEGORIES.contains(&self.0.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CategoryFilter {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated parameters for `GET /api/reviews`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    pub sort_by: SortColumn,
    pub order: SortOrder,
    pub category: Option<CategoryFilter>,
}

impl ReviewQuery {
    /// Validate raw query-string values.
    ///
    /// The order is checked before the column, so a request with both wrong
    /// reports the order. An empty `order` means the default.
    ///
    /// # Example
    /// ```
    /// use tabletop_server::models::{ReviewQuery, SortColumn, SortOrder};
    ///
    /// let query = ReviewQuery::parse(Some("votes"), Some("ASC"), None).unwrap();
    /// assert_eq!(query.sort_by, SortColumn::Votes);
    /// assert_eq!(query.order, SortOrder::Asc);
    /// assert!(ReviewQuery::parse(Some("password"), None, None).is_err());
    /// ```
    pub fn parse(
        sort_by: Option<&str>,
        order: Option<&str>,
        category: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let order = match order {
            None | Some("") => SortOrder::default(),
            Some(raw) => raw.parse()?,
        };

        let sort_by = match sort_by {
            None => SortColumn::default(),
            Some(raw) => raw.parse()?,
        };

        Ok(Self {
            sort_by,
            order,
            category: category.map(CategoryFilter::new),
        })
    }
}
