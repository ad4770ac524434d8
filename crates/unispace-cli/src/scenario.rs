//! Scenario files: declared finite uniform spaces plus the checks to run
//! over them.
//!
//! A scenario names its carrier points as strings, lists the entourage
//! basis as pair lists, and declares filters, sets, and checks by name.
//! Building goes through the kernel's validating constructors, so a
//! structurally broken scenario fails before any check runs.

use serde::Deserialize;
use std::collections::BTreeMap;
use unispace_checker::{
    CheckReport, is_cauchy, is_compact, is_complete, is_totally_bounded,
    separated_union_complete,
};
use unispace_kernel::{FilterBase, PointSet, Relation, RelationalUniformity, UnispaceError};

pub const SCENARIO_SCHEMA: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scenario {
    pub schema: u32,
    pub space: SpaceSpec,
    #[serde(default)]
    pub filters: BTreeMap<String, Vec<Vec<String>>>,
    #[serde(default)]
    pub sets: BTreeMap<String, Vec<String>>,
    pub checks: Vec<CheckSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpaceSpec {
    pub name: String,
    pub points: Vec<String>,
    /// One entourage per entry, each a list of (left, right) pairs.
    pub basis: Vec<Vec<(String, String)>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum CheckSpec {
    Cauchy {
        filter: String,
    },
    Complete {
        set: String,
    },
    Bounded {
        set: String,
        #[serde(default)]
        pool: Option<String>,
    },
    Compact {
        set: String,
    },
    SeparatedUnion {
        left: String,
        right: String,
        /// Index into the scenario's entourage basis.
        separator: usize,
    },
}

impl CheckSpec {
    /// The subcommand family the check belongs to.
    pub fn family(&self) -> &'static str {
        match self {
            CheckSpec::Cauchy { .. } => "cauchy",
            CheckSpec::Complete { .. } | CheckSpec::SeparatedUnion { .. } => "complete",
            CheckSpec::Bounded { .. } => "bounded",
            CheckSpec::Compact { .. } => "compact",
        }
    }
}

/// A scenario after validation: the space and all named inputs are built.
#[derive(Debug)]
pub struct BuiltScenario {
    pub space: RelationalUniformity<String>,
    pub filters: BTreeMap<String, FilterBase<String>>,
    pub sets: BTreeMap<String, PointSet<String>>,
    pub checks: Vec<CheckSpec>,
}

impl Scenario {
    pub fn build(self) -> Result<BuiltScenario, UnispaceError> {
        if self.schema != SCENARIO_SCHEMA {
            return Err(UnispaceError::InvalidScenario(format!(
                "unsupported scenario schema {} (expected {SCENARIO_SCHEMA})",
                self.schema
            )));
        }

        let points: PointSet<String> = self.space.points.iter().cloned().collect();
        let basis = self
            .space
            .basis
            .into_iter()
            .map(Relation::from_pairs)
            .collect();
        let space = RelationalUniformity::new(self.space.name, points.clone(), basis)?;

        let mut sets = BTreeMap::new();
        for (name, members) in self.sets {
            let set = named_subset(&name, &members, &points)?;
            sets.insert(name, set);
        }

        let mut filters = BTreeMap::new();
        for (name, families) in self.filters {
            let mut built = Vec::with_capacity(families.len());
            for members in &families {
                built.push(named_subset(&name, members, &points)?);
            }
            let filter = FilterBase::new(built).map_err(|err| {
                UnispaceError::InvalidScenario(format!("filter `{name}`: {err}"))
            })?;
            filters.insert(name, filter);
        }

        Ok(BuiltScenario {
            space,
            filters,
            sets,
            checks: self.checks,
        })
    }
}

fn named_subset(
    name: &str,
    members: &[String],
    points: &PointSet<String>,
) -> Result<PointSet<String>, UnispaceError> {
    if let Some(stray) = members.iter().find(|p| !points.contains(p)) {
        return Err(UnispaceError::InvalidScenario(format!(
            "`{name}` names point `{stray}` outside the carrier"
        )));
    }
    Ok(members.iter().cloned().collect())
}

impl BuiltScenario {
    fn filter(&self, name: &str) -> Result<&FilterBase<String>, UnispaceError> {
        self.filters.get(name).ok_or_else(|| {
            UnispaceError::InvalidScenario(format!("check references unknown filter `{name}`"))
        })
    }

    fn set(&self, name: &str) -> Result<&PointSet<String>, UnispaceError> {
        self.sets.get(name).ok_or_else(|| {
            UnispaceError::InvalidScenario(format!("check references unknown set `{name}`"))
        })
    }

    fn separator(&self, index: usize) -> Result<&Relation<String>, UnispaceError> {
        self.space.entourages().get(index).ok_or_else(|| {
            UnispaceError::InvalidScenario(format!(
                "separator index {index} exceeds the basis ({} entourages)",
                self.space.entourages().len()
            ))
        })
    }

    /// Run the declared checks, optionally restricted to one family.
    pub fn execute(&self, family: Option<&str>) -> Result<Vec<CheckReport>, UnispaceError> {
        let mut reports = Vec::new();
        for check in &self.checks {
            if family.is_some_and(|f| f != check.family()) {
                continue;
            }
            let report = match check {
                CheckSpec::Cauchy { filter } => is_cauchy(self.filter(filter)?, &self.space),
                CheckSpec::Complete { set } => is_complete(self.set(set)?, &self.space),
                CheckSpec::Bounded { set, pool } => {
                    let pool = match pool {
                        Some(name) => self.set(name)?,
                        None => self.space.points(),
                    };
                    is_totally_bounded(self.set(set)?, pool, &self.space)
                }
                CheckSpec::Compact { set } => is_compact(self.set(set)?, &self.space),
                CheckSpec::SeparatedUnion {
                    left,
                    right,
                    separator,
                } => separated_union_complete(
                    self.set(left)?,
                    self.set(right)?,
                    self.separator(*separator)?,
                    &self.space,
                ),
            };
            reports.push(report);
        }
        Ok(reports)
    }
}
