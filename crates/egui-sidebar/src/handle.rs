use crate::controller::{SidebarConfig, SidebarController};
use crate::errors::SidebarError;
use crate::persist::PreferenceStore;
use crate::state::{PanelLabel, PanelState};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared reference to a [`SidebarController`], passed explicitly to every
/// view that needs panel state.
///
/// A detached handle stands for "no controller in scope": every call on it
/// fails with [`SidebarError::MissingContext`].
#[derive(Clone, Default)]
pub struct SidebarHandle {
    inner: Option<Rc<RefCell<SidebarController>>>,
}

impl SidebarHandle {
    pub fn new(controller: SidebarController) -> Self {
        Self {
            inner: Some(Rc::new(RefCell::new(controller))),
        }
    }

    pub fn initialize(config: SidebarConfig, store: impl PreferenceStore + 'static) -> Self {
        Self::new(SidebarController::with_store(config, store))
    }

    pub fn detached() -> Self {
        Self { inner: None }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.is_some()
    }

    /// Run `f` with exclusive access to the controller.
    ///
    /// Calls made from inside a delegated `on_open_change` callback land here
    /// while the controller is still borrowed and get
    /// [`SidebarError::Reentrant`].
    pub fn with<R>(&self, f: impl FnOnce(&mut SidebarController) -> R) -> Result<R, SidebarError> {
        let cell = self.inner.as_ref().ok_or(SidebarError::MissingContext)?;
        let mut controller = cell.try_borrow_mut().map_err(|_| SidebarError::Reentrant)?;
        Ok(f(&mut controller))
    }

    fn read<R>(&self, f: impl FnOnce(&SidebarController) -> R) -> Result<R, SidebarError> {
        let cell = self.inner.as_ref().ok_or(SidebarError::MissingContext)?;
        let controller = cell.try_borrow().map_err(|_| SidebarError::Reentrant)?;
        Ok(f(&controller))
    }

    pub fn toggle(&self) -> Result<(), SidebarError> {
        self.with(SidebarController::toggle)
    }

    pub fn open(&self, value: bool) -> Result<(), SidebarError> {
        self.with(|c| c.open(value))
    }

    pub fn close(&self) -> Result<(), SidebarError> {
        self.with(SidebarController::close)
    }

    pub fn set_mobile_open(&self, value: bool) -> Result<(), SidebarError> {
        self.with(|c| c.set_mobile_open(value))
    }

    pub fn sync_controlled(&self, value: bool) -> Result<(), SidebarError> {
        self.with(|c| c.sync_controlled(value))
    }

    pub fn state(&self) -> Result<PanelLabel, SidebarError> {
        self.read(SidebarController::state)
    }

    pub fn is_mobile(&self) -> Result<bool, SidebarError> {
        self.read(SidebarController::is_mobile)
    }

    pub fn mobile_open(&self) -> Result<bool, SidebarError> {
        self.read(SidebarController::mobile_open)
    }

    pub fn panel_state(&self) -> Result<PanelState, SidebarError> {
        self.read(SidebarController::panel_state)
    }

    pub fn begin_frame(&self, ctx: &egui::Context) -> Result<usize, SidebarError> {
        self.with(|c| c.begin_frame(ctx))
    }

    pub fn mount(&self, ctx: &egui::Context) -> Result<(), SidebarError> {
        let width = crate::viewport::viewport_width(ctx);
        self.with(|c| c.mount(width))
    }

    pub fn unmount(&self) -> Result<(), SidebarError> {
        self.with(SidebarController::unmount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;

    #[test]
    fn detached_handle_fails_fast() {
        let handle = SidebarHandle::detached();
        assert!(matches!(handle.toggle(), Err(SidebarError::MissingContext)));
        assert!(matches!(handle.open(true), Err(SidebarError::MissingContext)));
        assert!(matches!(handle.close(), Err(SidebarError::MissingContext)));
        assert!(matches!(
            handle.set_mobile_open(true),
            Err(SidebarError::MissingContext)
        ));
        assert!(matches!(handle.state(), Err(SidebarError::MissingContext)));
    }

    #[test]
    fn clones_share_one_controller() {
        let handle = SidebarHandle::initialize(SidebarConfig::default(), MemoryStore::new());
        let other = handle.clone();
        other.toggle().unwrap();
        assert_eq!(handle.state().unwrap(), PanelLabel::Collapsed);
    }

    #[test]
    fn reentrant_call_from_delegate_is_rejected() {
        let slot: Rc<RefCell<Option<SidebarHandle>>> = Rc::default();
        let results = Rc::new(RefCell::new(Vec::new()));

        let (inner_slot, inner_results) = (slot.clone(), results.clone());
        let config = SidebarConfig::default().controlled(true, move |_| {
            if let Some(handle) = inner_slot.borrow().as_ref() {
                inner_results.borrow_mut().push(handle.toggle());
            }
        });
        let handle = SidebarHandle::initialize(config, MemoryStore::new());
        *slot.borrow_mut() = Some(handle.clone());

        handle.toggle().unwrap();
        assert!(matches!(
            results.borrow().as_slice(),
            [Err(SidebarError::Reentrant)]
        ));
    }
}
