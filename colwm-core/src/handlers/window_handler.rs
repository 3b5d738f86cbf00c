use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::{
    BBox, ColumnId, Handle, Manager, Pane, PaneId, SurfaceInfo, VisibilityState, WindowChange,
    WindowHandle,
};
use crate::state::State;
use crate::utils::child_process::{exec_argv, exec_shell};
use crate::DisplayAction;

impl<H: Handle> State<H> {
    /// Builds a pane for a surface and asks for its frame. Override redirect surfaces are not
    /// managed, they are only shown when they want to be visible.
    pub fn create_pane(&mut self, info: &SurfaceInfo<H>, captured: bool) -> Option<PaneId> {
        if info.override_redirect {
            tracing::trace!("not managing override redirect window {:?}", info.handle);
            if info.viewable {
                self.actions
                    .push_back(DisplayAction::ShowUnmanaged(info.handle));
            }
            return None;
        }
        let id = self.allocate_pane_id();
        let mut pane = Pane::from_surface(id, info);
        pane.flags.captured = captured;

        let column = self.find_column(info.x).and_then(|c| self.columns.get(c));
        let mut height = pane.clamp_height(info.height).max(0);
        if let Some(column) = column {
            height = height.min(column.max_height - self.titlebar_height);
        }
        pane.height = height.saturating_add(self.titlebar_height);

        let state = if pane.flags.minimized {
            VisibilityState::Iconic
        } else {
            VisibilityState::Normal
        };
        self.actions
            .push_back(DisplayAction::SetVisibilityState(info.handle, state));
        let width = self.frame_width().unwrap_or(info.width);
        self.actions.push_back(DisplayAction::CreateFrame {
            pane: id,
            window: Some(info.handle),
            bbox: BBox::new(info.x, info.y, width, pane.height),
        });
        tracing::debug!("created pane {} for {:?}", id, info.handle);
        self.panes.insert(id, pane);
        Some(id)
    }

    /// A pane with nothing in it yet, waiting for a command to be typed in its titlebar.
    pub fn create_placeholder(&mut self) -> PaneId {
        let id = self.allocate_pane_id();
        let mut pane = Pane::placeholder(id);
        pane.height = self.titlebar_height;
        let x = self
            .focus_column
            .and_then(|c| self.columns.get(c))
            .map_or(0, |c| c.x);
        let width = self.frame_width().unwrap_or_default();
        self.actions.push_back(DisplayAction::CreateFrame {
            pane: id,
            window: None,
            bbox: BBox::new(x, 0, width, pane.height),
        });
        self.panes.insert(id, pane);
        id
    }

    /// Trims the height a pane wishes for to what `column` holds. A client that asked for a
    /// height is placed with it, the others get their equal share.
    fn fit_to_column(&mut self, pane: PaneId, column: ColumnId) {
        let titlebar = self.titlebar_height;
        let Some(max_height) = self.columns.get(column).map(|c| c.max_height) else {
            return;
        };
        let Some(p) = self.panes.get_mut(&pane) else {
            return;
        };
        p.height = p.height.min(max_height.max(titlebar));
        if p.height > titlebar {
            p.adjusted_height = p.height;
        }
    }

    fn frame_width(&self) -> Option<i32> {
        self.focus_column
            .and_then(|c| self.columns.get(c))
            .or_else(|| self.columns.first())
            .map(|c| c.width)
    }

    /// Width a client may have, whatever it asks for.
    pub(crate) fn client_width(&self, pane: Option<PaneId>) -> Option<i32> {
        pane.and_then(|id| self.panes.get(&id))
            .and_then(Pane::column)
            .and_then(|c| self.columns.get(c))
            .map(|c| c.width)
            .or_else(|| self.frame_width())
    }
}

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// A client asks to be mapped. Returns true if changes need to be rendered.
    pub fn map_request_handler(&mut self, info: &SurfaceInfo<H>) -> bool {
        if self.state.find_pane(&info.handle).is_some() {
            tracing::trace!("double map of {:?}, ignore", info.handle);
            return false;
        }
        self.state.create_pane(info, false).is_some()
    }

    /// A surface that was there before us. Only visible ones are taken over.
    pub fn existing_window_handler(&mut self, info: &SurfaceInfo<H>) -> bool {
        if !info.viewable || info.override_redirect {
            tracing::trace!("not capturing {:?}", info.handle);
            return false;
        }
        if self.state.find_pane(&info.handle).is_some() {
            return false;
        }
        self.state.create_pane(info, true).is_some()
    }

    pub fn frame_created_handler(&mut self, pane: PaneId, frame: WindowHandle<H>) -> bool {
        let Some(p) = self.state.panes.get_mut(&pane) else {
            tracing::trace!("frame {:?} created for a pane that is gone", frame);
            self.state.actions.push_back(DisplayAction::DestroyFrame(frame));
            return false;
        };
        p.frame = Some(frame);
        self.state.redraw(pane);
        false
    }

    /// The client or the frame of a pane became visible, which is when a new pane is placed.
    pub fn window_mapped_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        let Some(id) = self.state.find_pane(handle) else {
            tracing::trace!("map of unknown window {:?}", handle);
            return false;
        };
        let state = &mut self.state;
        let Some(pane) = state.panes.get_mut(&id) else {
            return false;
        };
        if pane.window.as_ref() == Some(handle) {
            pane.flags.mapped = true;
            pane.flags.dirty = true;
        }
        let (column, captured, origin_x) = (pane.column, pane.flags.captured, pane.origin_x);
        pane.flags.captured = false;

        if let Some(column) = column {
            tracing::trace!("pane {} back from withdrawn or iconified", id);
            state.commit_column(column);
            if state.focus == Some(id) {
                state.focus_pane(Some(id));
            }
            return true;
        }

        let after_focus = state
            .focus_column
            .filter(|_| !captured)
            .map(|c| (c, state.focus.filter(|f| state.panes.get(f).and_then(Pane::column) == Some(c))));
        let (column, after) = match after_focus {
            Some(place) => place,
            None => {
                let Some(column) = state.find_column(origin_x) else {
                    tracing::warn!("no column to place pane {} in", id);
                    return false;
                };
                (column, state.columns[column].last())
            }
        };
        state.fit_to_column(id, column);
        state.manage_pane(id, column, after);
        state.focus_pane(Some(id));
        state.debug_check();
        true
    }

    /// Only the mapped flag changes, the destroy notification does the rest.
    pub fn window_unmapped_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        let pane = self
            .state
            .panes
            .values_mut()
            .find(|p| p.window.as_ref() == Some(handle));
        match pane {
            Some(pane) => {
                tracing::trace!("unmapping {:?} of pane {}", handle, pane.id);
                pane.flags.mapped = false;
            }
            None => tracing::trace!("unmap of a window we do not hold: {:?}", handle),
        }
        false
    }

    /// The client or the frame of a pane is gone. Returns true if changes need to be rendered.
    pub fn window_destroyed_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        let Some(pane) = self.state.find_pane(handle) else {
            tracing::trace!("destroy of a window we do not hold: {:?}", handle);
            return false;
        };
        if let Some(p) = self.state.panes.get_mut(&pane) {
            if p.frame.as_ref() == Some(handle) {
                p.frame = None;
            }
        }
        self.destroy_pane(pane);
        true
    }

    /// Detaches a pane and releases it. The focus moves to the most recently focused pane
    /// unless the pane is being restarted, the restarted client is going to take it.
    pub(crate) fn destroy_pane(&mut self, pane: PaneId) {
        tracing::debug!("destroying pane {}", pane);
        let column = self.state.unmanage_pane(pane, true);
        let Some(removed) = self.state.panes.remove(&pane) else {
            return;
        };
        if removed.flags.want_restart {
            if let Some(column) = column {
                self.state.focus_column(column);
            }
            self.restart_pane(&removed);
        }
        if let Some(frame) = removed.frame {
            self.state.actions.push_back(DisplayAction::DestroyFrame(frame));
        }
        if self.state.drag.pane == Some(pane) {
            self.state.drag.pane = None;
            self.state.drag.outline = None;
        }

        if self.state.focus == Some(pane) {
            self.state.focus = None;
        }
        self.state.clear_focus();
        if !removed.flags.want_restart {
            let next = self.state.previous_focus(None);
            self.state.focus_pane(next);
        }
        self.state.debug_check();
    }

    fn restart_pane(&mut self, pane: &Pane<H>) {
        let launched = if pane.prompt.text.is_empty() {
            exec_argv(&pane.command, &mut self.children)
        } else {
            exec_shell(&pane.prompt.text, &mut self.children)
        };
        if launched.is_none() {
            tracing::warn!("nothing launched to restart pane {}", pane.id);
        }
    }

    /// Politely when the client supports it, otherwise the client is killed and forgotten.
    pub fn close_pane(&mut self, pane: PaneId) {
        let Some(p) = self.state.panes.get(&pane) else {
            return;
        };
        match p.window {
            None => self.destroy_pane(pane),
            Some(window) if p.flags.has_delete_window => {
                self.state
                    .actions
                    .push_back(DisplayAction::SendDeleteRequest(window));
            }
            Some(window) => {
                self.state.actions.push_back(DisplayAction::KillClient(window));
                self.window_destroyed_handler(&window);
            }
        }
    }

    pub fn window_changed_handler(&mut self, change: WindowChange<H>) -> bool {
        let Some(id) = self.state.find_pane(&change.handle) else {
            return false;
        };
        let Some(pane) = self.state.panes.get_mut(&id) else {
            return false;
        };
        let changed = change.update(pane);
        if changed {
            self.state.redraw(id);
        }
        changed
    }

    /// Clients may move and size themselves as they like, except for their width.
    pub fn configure_request_handler(&mut self, handle: &WindowHandle<H>, requested: BBox) -> bool {
        let pane = self.state.find_pane(handle);
        let width = self.state.client_width(pane).unwrap_or(requested.width);
        let bbox = BBox { width, ..requested };
        self.state
            .actions
            .push_back(DisplayAction::ConfigureWindow(*handle, bbox));
        false
    }

    /// A client wants another height, its column is laid out again around the new wish. The
    /// wish is held to the size hints and to the column.
    pub fn resize_request_handler(&mut self, handle: &WindowHandle<H>, height: i32) -> bool {
        let Some(id) = self.state.find_pane(handle) else {
            return false;
        };
        let titlebar = self.state.titlebar_height;
        let max_height = self
            .state
            .panes
            .get(&id)
            .and_then(Pane::column)
            .and_then(|c| self.state.columns.get(c))
            .map_or(i32::MAX, |c| c.max_height);
        let Some(pane) = self.state.panes.get_mut(&id) else {
            return false;
        };
        if !pane.flags.minimized {
            let height = pane
                .clamp_height(height)
                .min(max_height.saturating_sub(titlebar))
                .max(0);
            pane.height = height.saturating_add(titlebar);
        }
        let Some(column) = pane.column else {
            return false;
        };
        pane.adjusted_height = pane.height;
        let state = &mut self.state;
        state.resize_remove(column, id);
        state.resize_add(column, id);
        state.commit_column(column);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MockHandle, Protocols, SizeHints};
    use crate::DisplayEvent;

    type TestManager = Manager<
        MockHandle,
        crate::config::tests::TestConfig,
        crate::display_servers::MockDisplayServer,
    >;

    fn manager() -> TestManager {
        let mut manager = Manager::new_test();
        manager.display_event_handler(DisplayEvent::ScreensCreate(vec![BBox::new(0, 0, 800, 600)]));
        manager
    }

    fn surface(handle: MockHandle, x: i32) -> SurfaceInfo<MockHandle> {
        SurfaceInfo {
            x,
            height: 300,
            viewable: true,
            ..SurfaceInfo::new(WindowHandle(handle))
        }
    }

    fn open(manager: &mut TestManager, info: &SurfaceInfo<MockHandle>) -> PaneId {
        assert!(manager.map_request_handler(info));
        manager.window_mapped_handler(&info.handle);
        manager.state.find_pane(&info.handle).unwrap()
    }

    #[test]
    fn override_redirect_windows_are_only_shown() {
        let mut manager = manager();
        let mut info = surface(1, 0);
        info.override_redirect = true;
        assert!(!manager.map_request_handler(&info));
        assert!(manager.state.panes.is_empty());
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::ShowUnmanaged(WindowHandle(1)))
        );
    }

    #[test]
    fn double_map_requests_are_ignored() {
        let mut manager = manager();
        let info = surface(1, 0);
        assert!(manager.map_request_handler(&info));
        assert!(!manager.map_request_handler(&info));
        assert_eq!(manager.state.panes.len(), 1);
    }

    #[test]
    fn iconic_windows_start_minimized() {
        let mut manager = manager();
        let mut info = surface(1, 0);
        info.iconic = true;
        let id = open(&mut manager, &info);
        let pane = &manager.state.panes[&id];
        assert!(pane.flags.minimized);
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::SetVisibilityState(WindowHandle(1), VisibilityState::Iconic)));
        assert_eq!(pane.adjusted_height, 20);
    }

    #[test]
    fn initial_height_is_clamped_to_hints_and_column() {
        let mut manager = manager();
        let mut info = surface(1, 0);
        info.height = 5000;
        manager.map_request_handler(&info);
        let id = manager.state.find_pane(&WindowHandle(1)).unwrap();
        assert_eq!(manager.state.panes[&id].height, 600);

        let mut info = surface(2, 0);
        info.height = 10;
        info.hints = SizeHints {
            min_height: Some(100),
            ..SizeHints::default()
        };
        manager.map_request_handler(&info);
        let id = manager.state.find_pane(&WindowHandle(2)).unwrap();
        assert_eq!(manager.state.panes[&id].height, 120);
    }

    #[test]
    fn requested_heights_are_kept_on_placement() {
        let mut manager = manager();
        let mut info = surface(1, 0);
        info.height = 400;
        let a = open(&mut manager, &info);
        assert_eq!(manager.state.panes[&a].adjusted_height, 600);

        let mut info = surface(2, 0);
        info.height = 80;
        info.hints = SizeHints {
            max_height: Some(80),
            ..SizeHints::default()
        };
        let b = open(&mut manager, &info);
        assert_eq!(manager.state.column_panes(0), vec![a, b]);
        assert_eq!(manager.state.panes[&b].adjusted_height, 100);
        assert_eq!(manager.state.panes[&a].adjusted_height, 500);
        assert!(manager.state.column_is_consistent(0));
    }

    #[test]
    fn heights_are_fitted_to_the_column_they_land_in() {
        let mut manager: TestManager = Manager::new_test();
        manager.display_event_handler(DisplayEvent::ScreensCreate(vec![
            BBox::new(0, 0, 400, 600),
            BBox::new(400, 0, 400, 200),
        ]));
        manager.state.focus_column(1);
        // The surface sits over the tall column but goes to the focused short one.
        let mut info = surface(1, 0);
        info.height = 500;
        info.iconic = true;
        manager.map_request_handler(&info);
        let id = manager.state.find_pane(&info.handle).unwrap();
        assert_eq!(manager.state.panes[&id].height, 520);

        manager.frame_created_handler(id, WindowHandle(70));
        assert!(manager.window_mapped_handler(&WindowHandle(70)));
        assert_eq!(manager.state.column_panes(1), vec![id]);
        assert_eq!(manager.state.panes[&id].height, 200);
    }

    #[test]
    fn new_windows_go_after_the_focus() {
        let mut manager = manager();
        let a = open(&mut manager, &surface(1, 0));
        let b = open(&mut manager, &surface(2, 0));
        manager.state.focus_pane(Some(a));
        // The x of the surface points at the second column, the focus wins.
        let c = open(&mut manager, &surface(3, 500));
        assert_eq!(manager.state.column_panes(0), vec![a, c, b]);
        assert_eq!(manager.state.focus, Some(c));
        assert!(manager.state.focus_is_consistent());
    }

    #[test]
    fn captured_windows_go_to_the_column_under_them() {
        let mut manager = manager();
        let a = open(&mut manager, &surface(1, 0));
        manager.state.focus_pane(Some(a));
        let info = surface(2, 500);
        assert!(manager.existing_window_handler(&info));
        manager.window_mapped_handler(&info.handle);
        let b = manager.state.find_pane(&info.handle).unwrap();
        assert_eq!(manager.state.column_panes(1), vec![b]);
        assert!(!manager.state.panes[&b].flags.captured);

        let mut hidden = surface(3, 0);
        hidden.viewable = false;
        assert!(!manager.existing_window_handler(&hidden));
    }

    #[test]
    fn mapping_the_frame_places_a_minimized_pane() {
        let mut manager = manager();
        let mut info = surface(1, 0);
        info.iconic = true;
        manager.map_request_handler(&info);
        let id = manager.state.find_pane(&info.handle).unwrap();
        manager.frame_created_handler(id, WindowHandle(77));
        assert!(manager.window_mapped_handler(&WindowHandle(77)));
        assert_eq!(manager.state.column_panes(0), vec![id]);
        assert!(!manager.state.panes[&id].flags.mapped);
    }

    #[test]
    fn unmap_only_clears_the_mapped_flag() {
        let mut manager = manager();
        let a = open(&mut manager, &surface(1, 0));
        assert!(manager.state.panes[&a].flags.mapped);
        manager.window_unmapped_handler(&WindowHandle(1));
        assert!(!manager.state.panes[&a].flags.mapped);
        assert_eq!(manager.state.column_panes(0), vec![a]);
    }

    #[test]
    fn destroy_promotes_the_most_recent_focus() {
        let mut manager = manager();
        let a = open(&mut manager, &surface(1, 0));
        let b = open(&mut manager, &surface(2, 0));
        let c = open(&mut manager, &surface(3, 0));
        manager.state.focus_pane(Some(b));
        manager.state.focus_pane(Some(c));
        assert!(manager.window_destroyed_handler(&WindowHandle(3)));
        assert!(!manager.state.panes.contains_key(&c));
        assert_eq!(manager.state.focus, Some(b));
        assert!(manager.state.panes[&b].flags.focused);
        assert!(!manager.state.panes[&a].flags.focused);
        assert!(manager.state.focus_is_consistent());
        assert!(manager.state.column_is_consistent(0));
    }

    #[test]
    fn destroy_with_restart_leaves_focus_empty() {
        let mut manager = manager();
        let a = open(&mut manager, &surface(1, 0));
        let b = open(&mut manager, &surface(2, 500));
        let _ = a;
        manager.state.panes.get_mut(&b).unwrap().flags.want_restart = true;
        manager.window_destroyed_handler(&WindowHandle(2));
        assert_eq!(manager.state.focus, None);
        assert!(manager.state.panes.values().all(|p| !p.flags.focused));
        assert_eq!(manager.state.focus_column, Some(0));
    }

    #[test]
    fn destroying_the_frame_removes_the_pane() {
        let mut manager = manager();
        let a = open(&mut manager, &surface(1, 0));
        let b = open(&mut manager, &surface(2, 0));
        manager.frame_created_handler(a, WindowHandle(70));
        manager.state.actions.clear();

        assert!(manager.window_destroyed_handler(&WindowHandle(70)));
        assert!(!manager.state.panes.contains_key(&a));
        assert_eq!(manager.state.column_panes(0), vec![b]);
        assert_eq!(manager.state.panes[&b].adjusted_height, 600);
        assert_eq!(manager.state.focus, Some(b));
        assert!(!manager
            .state
            .actions
            .contains(&DisplayAction::DestroyFrame(WindowHandle(70))));

        // The client goes away after its frame, nothing is left to do.
        assert!(!manager.window_destroyed_handler(&WindowHandle(1)));
        assert!(manager.state.column_is_consistent(0));
    }

    #[test]
    fn destroy_of_unknown_window_changes_nothing() {
        let mut manager = manager();
        open(&mut manager, &surface(1, 0));
        assert!(!manager.window_destroyed_handler(&WindowHandle(42)));
        assert_eq!(manager.state.panes.len(), 1);
    }

    #[test]
    fn close_asks_nicely_when_the_client_supports_it() {
        let mut manager = manager();
        let mut info = surface(1, 0);
        info.protocols = Protocols {
            delete_window: true,
            take_focus: false,
        };
        let a = open(&mut manager, &info);
        manager.close_pane(a);
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::SendDeleteRequest(WindowHandle(1)))
        );
        assert!(manager.state.panes.contains_key(&a));

        let b = open(&mut manager, &surface(2, 0));
        manager.close_pane(b);
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::KillClient(WindowHandle(2))));
        assert!(!manager.state.panes.contains_key(&b));
    }

    #[test]
    fn configure_requests_keep_the_column_width() {
        let mut manager = manager();
        open(&mut manager, &surface(1, 0));
        manager.configure_request_handler(&WindowHandle(1), BBox::new(5, 6, 1000, 123));
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::ConfigureWindow(WindowHandle(1), BBox::new(5, 6, 400, 123)))
        );
    }

    #[test]
    fn resize_requests_reflow_the_column() {
        let mut manager = manager();
        let a = open(&mut manager, &surface(1, 0));
        let b = open(&mut manager, &surface(2, 0));
        manager.state.focus_pane(Some(b));
        assert!(manager.resize_request_handler(&WindowHandle(1), 80));
        assert_eq!(manager.state.panes[&a].adjusted_height, 100);
        assert_eq!(manager.state.panes[&b].adjusted_height, 500);
        assert!(manager.state.column_is_consistent(0));
    }

    #[test]
    fn resize_requests_are_held_to_the_column() {
        let mut manager = manager();
        let a = open(&mut manager, &surface(1, 0));
        let b = open(&mut manager, &surface(2, 0));

        assert!(manager.resize_request_handler(&WindowHandle(1), i32::MAX));
        assert_eq!(manager.state.panes[&a].adjusted_height, 300);
        assert_eq!(manager.state.panes[&b].adjusted_height, 300);

        assert!(manager.resize_request_handler(&WindowHandle(1), i32::MIN));
        assert_eq!(manager.state.panes[&a].adjusted_height, 20);
        assert_eq!(manager.state.panes[&b].adjusted_height, 580);
        assert!(manager.state.column_is_consistent(0));
    }

    #[test]
    fn property_changes_redraw_the_titlebar() {
        let mut manager = manager();
        let a = open(&mut manager, &surface(1, 0));
        manager.state.actions.clear();
        let mut change = WindowChange::new(WindowHandle(1));
        change.name = Some("editor".to_owned());
        assert!(manager.window_changed_handler(change));
        assert_eq!(manager.state.panes[&a].title(), Some("editor"));
        assert!(matches!(manager.state.actions.back(), Some(DisplayAction::Redraw(_))));
    }
}
