//! Selection model: the distinct values of every category, which of them are
//! selected and which rows they stand for.

use log::debug;
use tokenize::sanitize;

use crate::data::{DataView, IdentityKey, IdentityProvider};
use crate::filters::Filters;
use crate::settings::Settings;

/// A distinct display value of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPoint {
    pub display_name: String,
    pub selected: bool,
    /// Rows admitted by the other categories' filters.
    pub identities: Vec<IdentityKey>,
    /// Rows hidden by the other categories' filters.
    pub hidden_identities: Vec<IdentityKey>,
}

impl DataPoint {
    /// Whether the value is offered at all. A value whose rows are all
    /// filtered out by other categories is not.
    pub fn is_visible(&self) -> bool {
        !self.identities.is_empty()
    }

    /// Every row of the value, visible ones first.
    pub fn all_identities(&self) -> impl Iterator<Item = &IdentityKey> {
        self.identities.iter().chain(&self.hidden_identities)
    }
}

/// One category and its distinct values in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataGroup {
    pub display_name: String,
    pub points: Vec<DataPoint>,
}

impl DataGroup {
    pub fn visible_points(&self) -> impl Iterator<Item = &DataPoint> {
        self.points.iter().filter(|p| p.is_visible())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub groups: Vec<DataGroup>,
    pub filters: Filters,
    pub settings: Settings,
}

impl Model {
    /// Build the model from a data view, the settings and the persisted
    /// selection they carry.
    ///
    /// Rows whose display texts sanitize to the same value collapse into one
    /// data point; the first row decides whether the point is selected. With
    /// `filterMultiple`, rows not admitted by another category's non-empty
    /// filter go to `hidden_identities`.
    pub fn transform(data: &DataView, settings: Settings, identities: &impl IdentityProvider) -> Self {
        let filters = Filters::load(settings.general.selection.as_deref(), data, identities);
        let filter_multiple = settings.search.filter_multiple;

        let groups = data
            .categories
            .iter()
            .map(|category| {
                let name = &category.display_name;
                let mut points: Vec<DataPoint> = Vec::new();

                for (row, value) in category.values.iter().enumerate() {
                    let display_name = value.display_name();
                    let identity = identities.identity(category, row);
                    let admitted = !filter_multiple || filters.admits(name, &identity);

                    let key = sanitize(&display_name).into_owned();
                    match points.iter_mut().find(|p| sanitize(&p.display_name) == key) {
                        Some(point) if admitted => point.identities.push(identity),
                        Some(point) => point.hidden_identities.push(identity),
                        None => {
                            let selected = filters.contains(name, &identity);
                            let (visible, hidden) = if admitted {
                                (vec![identity], Vec::new())
                            } else {
                                (Vec::new(), vec![identity])
                            };
                            points.push(DataPoint {
                                display_name,
                                selected,
                                identities: visible,
                                hidden_identities: hidden,
                            });
                        }
                    }
                }

                debug!("Category {:?}: {} distinct values", name, points.len());
                DataGroup {
                    display_name: name.clone(),
                    points,
                }
            })
            .collect();

        Self {
            groups,
            filters,
            settings,
        }
    }

    pub fn group(&self, index: usize) -> Option<&DataGroup> {
        self.groups.get(index)
    }
}
