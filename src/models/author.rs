//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::validation::{FieldError, FieldSpec, FormFields, Rule, RuleSet};

/// Display format for dates on author pages ("Dec 16, 1775")
const DATE_MED: &str = "%b %-d, %Y";
/// Format expected by `<input type="date">`
const DATE_INPUT: &str = "%Y-%m-%d";

pub const NAME_MAX_LENGTH: u64 = 100;

/// Full author record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "Family, First"; whichever name exists alone; "unknown" when neither does
    pub fn full_name(&self) -> String {
        match (self.family_name.is_empty(), self.first_name.is_empty()) {
            (false, false) => format!("{}, {}", self.family_name, self.first_name),
            (false, true) => self.family_name.clone(),
            (true, false) => self.first_name.clone(),
            (true, true) => "unknown".to_string(),
        }
    }

    pub fn url(&self) -> String {
        author_url(self.id)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        format_date(self.date_of_birth)
    }

    pub fn date_of_death_formatted(&self) -> String {
        format_date(self.date_of_death)
    }

    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth_formatted(),
            self.date_of_death_formatted()
        )
    }

    /// Apply a draft's mutable fields, keeping the id
    pub fn apply(&mut self, draft: &AuthorDraft) {
        self.first_name = draft.first_name.clone();
        self.family_name = draft.family_name.clone();
        self.date_of_birth = draft.date_of_birth;
        self.date_of_death = draft.date_of_death;
    }
}

pub fn author_url(id: Uuid) -> String {
    format!("/catalog/author/{}", id)
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_MED).to_string()).unwrap_or_default()
}

/// Sort keys accepted by the author listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorSortKey {
    /// Family name, then first name
    #[default]
    FamilyName,
    FirstName,
    DateOfBirth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthorSort {
    pub key: AuthorSortKey,
    pub direction: SortDirection,
}

impl AuthorSort {
    pub fn by_family_name() -> Self {
        Self::default()
    }

    pub fn order_by_sql(&self) -> String {
        let dir = self.direction.sql();
        match self.key {
            AuthorSortKey::FamilyName => format!("family_name {dir}, first_name {dir}"),
            AuthorSortKey::FirstName => format!("first_name {dir}, family_name {dir}"),
            AuthorSortKey::DateOfBirth => format!("date_of_birth {dir} NULLS LAST, family_name ASC"),
        }
    }
}

/// Sanitized, not yet persisted author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Create / update author form body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AuthorForm {
    pub first_name: Option<String>,
    pub family_name: Option<String>,
    /// ISO-8601 date, empty for unknown
    pub date_of_birth: Option<String>,
    /// ISO-8601 date, empty for unknown
    pub date_of_death: Option<String>,
}

/// Delete confirmation form body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DeleteAuthorForm {
    pub authorid: Option<String>,
}

/// Values echoed back into the author form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFormValues {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorFormValues {
    fn from(author: &Author) -> Self {
        let input_date = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_INPUT).to_string()).unwrap_or_default()
        };
        Self {
            id: Some(author.id),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: input_date(author.date_of_birth),
            date_of_death: input_date(author.date_of_death),
        }
    }
}

/// A checked form submission: what to show again, and the draft if it passed
#[derive(Debug, Clone)]
pub struct AuthorSubmission {
    pub values: AuthorFormValues,
    pub draft: Result<AuthorDraft, Vec<FieldError>>,
}

pub fn author_rules() -> RuleSet {
    let name = || {
        vec![
            Rule::Trim,
            Rule::Length { min: 1, max: Some(NAME_MAX_LENGTH) },
            Rule::Escape,
            Rule::Alphanumeric,
        ]
    };
    let date = || vec![Rule::Trim, Rule::OptionalIsoDate];

    RuleSet::new(vec![
        FieldSpec::new("first_name", "First name", name()),
        FieldSpec::new("family_name", "Family name", name()),
        FieldSpec::new("date_of_birth", "Date of birth", date()),
        FieldSpec::new("date_of_death", "Date of death", date()),
    ])
}

impl AuthorForm {
    fn fields(&self) -> FormFields {
        FormFields::new()
            .with("first_name", self.first_name.as_deref())
            .with("family_name", self.family_name.as_deref())
            .with("date_of_birth", self.date_of_birth.as_deref())
            .with("date_of_death", self.date_of_death.as_deref())
    }

    /// Sanitize and validate; `id` is carried into the echoed values on update
    pub fn check(&self, id: Option<Uuid>) -> AuthorSubmission {
        let validated = author_rules().validate(&self.fields());

        // The form shows what was typed; the renderer escapes it once.
        let values = AuthorFormValues {
            id,
            first_name: validated.raw("first_name").to_string(),
            family_name: validated.raw("family_name").to_string(),
            date_of_birth: validated.raw("date_of_birth").to_string(),
            date_of_death: validated.raw("date_of_death").to_string(),
        };

        let draft = if validated.is_valid() {
            Ok(AuthorDraft {
                first_name: validated.text("first_name").to_string(),
                family_name: validated.text("family_name").to_string(),
                date_of_birth: validated.date("date_of_birth"),
                date_of_death: validated.date("date_of_death"),
            })
        } else {
            Err(validated.errors)
        };

        AuthorSubmission { values, draft }
    }
}
