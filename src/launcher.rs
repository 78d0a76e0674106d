//! Hand-off from the catalog to whatever presents module content.
//!
//! The catalog only knows each module's opaque `EntryPoint`; a
//! `ContentHost` turns that into something on screen (or, for the CLI, a
//! line on stdout).

use crate::catalog::{ModuleCatalog, ModuleId, StudyModule};
use anyhow::Result;
use log::debug;

/// Presentation layer that can show a resolved module.
pub trait ContentHost {
    fn present(&self, module: &StudyModule) -> Result<()>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LaunchOutcome {
    Presented(ModuleId),
    NotFound,
}

/// Resolve `id` and hand the module to `host`.
///
/// An unknown id is reported as `LaunchOutcome::NotFound`; only host
/// failures are errors.
pub fn launch<H: ContentHost + ?Sized>(
    catalog: &ModuleCatalog,
    host: &H,
    id: &str,
) -> Result<LaunchOutcome> {
    let Some(module) = catalog.get_by_id(id) else {
        debug!("launch requested for unknown module '{id}'");
        return Ok(LaunchOutcome::NotFound);
    };
    debug!("presenting {} via {}", module.id, module.entry_point.0);
    host.present(module)?;
    Ok(LaunchOutcome::Presented(module.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::index::tests::fixture;
    use anyhow::bail;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHost {
        shown: RefCell<Vec<String>>,
    }

    impl ContentHost for RecordingHost {
        fn present(&self, module: &StudyModule) -> Result<()> {
            self.shown.borrow_mut().push(module.entry_point.0.clone());
            Ok(())
        }
    }

    struct FailingHost;

    impl ContentHost for FailingHost {
        fn present(&self, module: &StudyModule) -> Result<()> {
            bail!("no screen registered for {}", module.entry_point.0)
        }
    }

    #[test]
    fn launch_presents_resolved_module() {
        let catalog = fixture();
        let host = RecordingHost::default();
        let outcome = launch(&catalog, &host, "preview").unwrap();
        assert_eq!(outcome, LaunchOutcome::Presented(ModuleId::from("preview")));
        assert_eq!(*host.shown.borrow(), vec!["screen/preview".to_string()]);
    }

    #[test]
    fn unknown_id_is_not_an_error() {
        let catalog = fixture();
        let host = RecordingHost::default();
        let outcome = launch(&catalog, &host, "missing").unwrap();
        assert_eq!(outcome, LaunchOutcome::NotFound);
        assert!(host.shown.borrow().is_empty());
    }

    #[test]
    fn host_failures_propagate() {
        let catalog = fixture();
        let err = launch(&catalog, &FailingHost, "remember").unwrap_err();
        assert!(err.to_string().contains("screen/remember"));
    }
}
