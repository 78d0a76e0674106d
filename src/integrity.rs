//! Prerequisite integrity checks for a built catalog.
//!
//! Queries tolerate dangling ids and cycles; this module reports them so the
//! strict construction policy and the `check` command can surface every
//! problem at once.

use crate::catalog::{ModuleCatalog, ModuleId, StudyModule};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IntegrityIssue {
    DanglingPrerequisite {
        module: ModuleId,
        prerequisite: ModuleId,
    },
    SelfReference {
        module: ModuleId,
    },
    DuplicatePrerequisite {
        module: ModuleId,
        prerequisite: ModuleId,
    },
    /// Ids along the cycle; the first id is repeated at the end.
    Cycle {
        path: Vec<ModuleId>,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DanglingPrerequisite {
                module,
                prerequisite,
            } => write!(f, "module {module} references unknown prerequisite '{prerequisite}'"),
            IntegrityIssue::SelfReference { module } => {
                write!(f, "module {module} lists itself as a prerequisite")
            }
            IntegrityIssue::DuplicatePrerequisite {
                module,
                prerequisite,
            } => write!(f, "module {module} lists prerequisite '{prerequisite}' more than once"),
            IntegrityIssue::Cycle { path } => {
                let joined = path
                    .iter()
                    .map(ModuleId::as_str)
                    .collect::<Vec<_>>()
                    .join(" -> ");
                write!(f, "prerequisite cycle: {joined}")
            }
        }
    }
}

/// Collect every integrity issue in catalog order; cycles come last.
pub fn check_catalog(catalog: &ModuleCatalog) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    for module in catalog.modules() {
        let mut seen = BTreeSet::new();
        for prerequisite in &module.prerequisites {
            if !seen.insert(prerequisite.as_str()) {
                issues.push(IntegrityIssue::DuplicatePrerequisite {
                    module: module.id.clone(),
                    prerequisite: prerequisite.clone(),
                });
                continue;
            }
            if prerequisite == &module.id {
                issues.push(IntegrityIssue::SelfReference {
                    module: module.id.clone(),
                });
            } else if catalog.get_by_id(prerequisite.as_str()).is_none() {
                issues.push(IntegrityIssue::DanglingPrerequisite {
                    module: module.id.clone(),
                    prerequisite: prerequisite.clone(),
                });
            }
        }
    }
    issues.extend(
        find_cycles(catalog)
            .into_iter()
            .map(|path| IntegrityIssue::Cycle { path }),
    );
    issues
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

fn find_cycles(catalog: &ModuleCatalog) -> Vec<Vec<ModuleId>> {
    let mut marks: BTreeMap<&str, Mark> = BTreeMap::new();
    let mut cycles = Vec::new();
    for module in catalog.modules() {
        if !marks.contains_key(module.id.as_str()) {
            walk(catalog, module, &mut marks, &mut cycles);
        }
    }
    cycles
}

/// One module on the walk plus the index of the next prerequisite to follow.
struct Frame<'a> {
    module: &'a StudyModule,
    next: usize,
    followed: BTreeSet<&'a str>,
}

impl<'a> Frame<'a> {
    fn enter(module: &'a StudyModule, marks: &mut BTreeMap<&'a str, Mark>) -> Self {
        marks.insert(module.id.as_str(), Mark::InProgress);
        Frame {
            module,
            next: 0,
            followed: BTreeSet::new(),
        }
    }
}

/// Depth-first walk from `root` on an explicit frame stack.
fn walk<'a>(
    catalog: &'a ModuleCatalog,
    root: &'a StudyModule,
    marks: &mut BTreeMap<&'a str, Mark>,
    cycles: &mut Vec<Vec<ModuleId>>,
) {
    let mut frames = vec![Frame::enter(root, marks)];
    while let Some(frame) = frames.last_mut() {
        let module = frame.module;
        let Some(prerequisite) = module.prerequisites.get(frame.next) else {
            marks.insert(module.id.as_str(), Mark::Done);
            frames.pop();
            continue;
        };
        frame.next += 1;

        // Self-references and repeated edges are reported separately.
        if prerequisite == &module.id || !frame.followed.insert(prerequisite.as_str()) {
            continue;
        }
        let Some(next) = catalog.get_by_id(prerequisite.as_str()) else {
            continue;
        };
        match marks.get(next.id.as_str()).copied() {
            Some(Mark::InProgress) => {
                if let Some(start) = frames.iter().position(|f| f.module.id == next.id) {
                    let mut path: Vec<ModuleId> =
                        frames[start..].iter().map(|f| f.module.id.clone()).collect();
                    path.push(next.id.clone());
                    cycles.push(path);
                }
            }
            Some(Mark::Done) => {}
            None => frames.push(Frame::enter(next, marks)),
        }
    }
}
