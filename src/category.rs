/// Quote categories, in the order they are stored in the `quoteType`
/// preference (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Inspirational,
    Age,
    Art,
    Attitude,
    Courage,
    Education,
    Equality,
    Faith,
    Family,
    Friendship,
    Funny,
    Future,
    Happiness,
    Success,
}

impl Category {
    /// Every category, indexed by `preference - 1`.
    pub const ALL: [Category; 14] = [
        Category::Inspirational,
        Category::Age,
        Category::Art,
        Category::Attitude,
        Category::Courage,
        Category::Education,
        Category::Equality,
        Category::Faith,
        Category::Family,
        Category::Friendship,
        Category::Funny,
        Category::Future,
        Category::Happiness,
        Category::Success,
    ];

    /// Look up the category for a stored preference value.
    pub fn from_preference(value: i64) -> Option<Category> {
        if !(1..=Self::ALL.len() as i64).contains(&value) {
            return None;
        }
        Self::ALL.get((value - 1) as usize).copied()
    }

    /// The preference value that selects this category.
    pub fn preference(self) -> i64 {
        Self::ALL
            .iter()
            .position(|c| *c == self)
            .map(|i| i as i64 + 1)
            .unwrap_or(1)
    }

    /// Tag sent to the quote API.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Inspirational => "inspirational",
            Category::Age => "age",
            Category::Art => "art",
            Category::Attitude => "attitude",
            Category::Courage => "courage",
            Category::Education => "education",
            Category::Equality => "equality",
            Category::Faith => "faith",
            Category::Family => "family",
            Category::Friendship => "friendship",
            Category::Funny => "funny",
            Category::Future => "future",
            Category::Happiness => "happiness",
            Category::Success => "success",
        }
    }

    /// Name shown in the settings picker.
    pub fn label(self) -> &'static str {
        match self {
            Category::Inspirational => "Inspirational",
            Category::Age => "Age",
            Category::Art => "Art",
            Category::Attitude => "Attitude",
            Category::Courage => "Courage",
            Category::Education => "Education",
            Category::Equality => "Equality",
            Category::Faith => "Faith",
            Category::Family => "Family",
            Category::Friendship => "Friendship",
            Category::Funny => "Funny",
            Category::Future => "Future",
            Category::Happiness => "Happiness",
            Category::Success => "Success",
        }
    }
}

/// Tag for a raw preference value; empty when the value is out of range,
/// which the API treats as "no filter".
pub fn tag_for_preference(value: i64) -> &'static str {
    Category::from_preference(value)
        .map(Category::tag)
        .unwrap_or("")
}
