//! Contact records and the three fixed category buckets.
//!
//! A [`ContactBook`] is one user's full contact document: three ordered
//! lists keyed `family`, `friends` and `work`. Categories form a closed
//! enumeration; free-form category strings never travel past the HTTP
//! boundary.

use serde::{Deserialize, Serialize};

/// One of the three fixed contact buckets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Category {
    Family,
    Friends,
    Work,
}

impl Category {
    /// Bucket display order: family, then friends, then work.
    pub const ALL: [Self; 3] = [Self::Family, Self::Friends, Self::Work];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Friends => "friends",
            Self::Work => "work",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "family" => Some(Self::Family),
            "friends" => Some(Self::Friends),
            "work" => Some(Self::Work),
            _ => None,
        }
    }
}

/// Selection for the category listing page: one bucket, or all of them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CategoryFilter {
    All,
    Bucket(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value == "all" {
            return Some(Self::All);
        }
        Category::parse(value).map(Self::Bucket)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Bucket(category) => category.as_str(),
        }
    }
}

/// A single contact entry. All fields are plain strings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Contact {
    pub name: String,
    pub mobile: String,
    pub home: String,
    pub email: String,
}

/// Why a new contact was not accepted. Both cases surface the same
/// generic message to the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContactRejection {
    EmptyName,
    DuplicateName,
}

/// One user's full contact document: exactly three buckets.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContactBook {
    pub family: Vec<Contact>,
    pub friends: Vec<Contact>,
    pub work: Vec<Contact>,
}

impl ContactBook {
    #[must_use]
    pub fn bucket(&self, category: Category) -> &[Contact] {
        match category {
            Category::Family => &self.family,
            Category::Friends => &self.friends,
            Category::Work => &self.work,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<Contact> {
        match category {
            Category::Family => &mut self.family,
            Category::Friends => &mut self.friends,
            Category::Work => &mut self.work,
        }
    }

    /// All contacts in bucket order (family, friends, work), insertion
    /// order within each bucket.
    pub fn all(&self) -> impl Iterator<Item = &Contact> {
        self.family.iter().chain(&self.friends).chain(&self.work)
    }

    /// Exact post-trim name match anywhere in the document.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.all().any(|contact| contact.name == name)
    }

    /// Append a new contact to the chosen bucket.
    ///
    /// The name is trimmed before validation; an empty or duplicate name
    /// is rejected. Returns the stored (trimmed) name on success.
    ///
    /// # Errors
    /// Returns a [`ContactRejection`] when the trimmed name is empty or
    /// already present in any bucket.
    pub fn add(
        &mut self,
        category: Category,
        name: &str,
        mobile: &str,
        home: &str,
        email: &str,
    ) -> Result<String, ContactRejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContactRejection::EmptyName);
        }
        if self.contains_name(name) {
            return Err(ContactRejection::DuplicateName);
        }

        self.bucket_mut(category).push(Contact {
            name: name.to_string(),
            mobile: mobile.to_string(),
            home: home.to_string(),
            email: email.to_string(),
        });

        Ok(name.to_string())
    }
}
