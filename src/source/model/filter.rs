use serde::{Deserialize, Serialize};

/// One filter a catalog source accepts.
///
/// `state` holds the current user choice. Sources hand out their filters
/// with default states and read the states back from the list they receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// Label only
    Header { name: String },
    Separator,
    Text { name: String, state: String },
    Check { name: String, state: bool },
    TriState { name: String, state: TriState },
    /// `state` indexes into `values`
    Select {
        name: String,
        values: Vec<String>,
        state: usize,
    },
    Sort {
        name: String,
        values: Vec<String>,
        state: Option<SortSelection>,
    },
    Group { name: String, filters: Vec<Filter> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    #[default]
    Ignore,
    Include,
    Exclude,
}

/// Selected sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSelection {
    pub index: usize,
    pub ascending: bool,
}

impl Filter {
    pub fn name(&self) -> Option<&str> {
        match self {
            Filter::Separator => None,
            Filter::Header { name }
            | Filter::Text { name, .. }
            | Filter::Check { name, .. }
            | Filter::TriState { name, .. }
            | Filter::Select { name, .. }
            | Filter::Sort { name, .. }
            | Filter::Group { name, .. } => Some(name),
        }
    }

    /// Selected value of a Select filter
    pub fn selected_value(&self) -> Option<&str> {
        match self {
            Filter::Select { values, state, .. } => values.get(*state).map(String::as_str),
            _ => None,
        }
    }
}

/// Ordered filters of a catalog source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterList(Vec<Filter>);

impl FilterList {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self(filters)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First filter named `name`, searching inside groups
    pub fn find(&self, name: &str) -> Option<&Filter> {
        fn search<'a>(filters: &'a [Filter], name: &str) -> Option<&'a Filter> {
            for filter in filters {
                if filter.name() == Some(name) {
                    return Some(filter);
                }
                if let Filter::Group { filters, .. } = filter {
                    if let Some(found) = search(filters, name) {
                        return Some(found);
                    }
                }
            }
            None
        }
        search(&self.0, name)
    }

    /// Mutable access to a top-level filter, for setting its state
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Filter> {
        self.0.iter_mut().find(|f| f.name() == Some(name))
    }

    /// Non-empty text state of the Text filter named `name`
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.find(name) {
            Some(Filter::Text { state, .. }) if !state.trim().is_empty() => Some(state.trim()),
            _ => None,
        }
    }

    /// Selection of the Sort filter named `name`
    pub fn sort(&self, name: &str) -> Option<SortSelection> {
        match self.find(name) {
            Some(Filter::Sort { state, .. }) => *state,
            _ => None,
        }
    }
}

impl From<Vec<Filter>> for FilterList {
    fn from(filters: Vec<Filter>) -> Self {
        Self(filters)
    }
}

impl FromIterator<Filter> for FilterList {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FilterList {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
