use std::collections::HashSet;

pub const ALL_BRANCHES_LABEL: &str = "Todas";

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub branch: String,
    pub product: String,
    pub year: i32,
    pub month: u32,
    pub units_sold: f64,
    pub total_revenue: f64,
    pub total_cost: f64,
}

impl SalesRecord {
    pub fn period(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}

/// Every record of one upload, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct branches in order of first appearance.
    pub fn branches(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|record| record.branch.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BranchFilter {
    #[default]
    All,
    Branch(String),
}

impl BranchFilter {
    pub fn from_label(label: &str) -> Self {
        if label == ALL_BRANCHES_LABEL {
            BranchFilter::All
        } else {
            BranchFilter::Branch(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BranchFilter::All => ALL_BRANCHES_LABEL,
            BranchFilter::Branch(name) => name,
        }
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        match self {
            BranchFilter::All => true,
            BranchFilter::Branch(name) => record.branch == *name,
        }
    }
}

pub(crate) fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for value in values {
        if seen.insert(value) {
            ordered.push(value.to_string());
        }
    }
    ordered
}
