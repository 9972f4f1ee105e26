//! Taskbar controller: start menu, search dialog visibility, submenu hover
//! debounce, system clock, notifications, and the running-app tray.
//!
//! This is a plain state machine with no UI types. Every operation is a
//! synchronous transition that may return `TaskbarEffect`s for the UI layer
//! to apply (focus moves, clearing the search input). Time is injected so
//! the whole thing is testable without sleeping.
//!
//! Missing UI pieces degrade to no-ops at the adapter layer; the controller
//! itself never fails.

use std::time::{Duration, Instant};

use chrono::{Datelike, Timelike};
use uuid::Uuid;

use super::clock;
use super::timer::{earliest, Countdown, Metronome};

/// Delay before a hovered menu item shows its submenu.
pub const SUBMENU_SHOW_DELAY: Duration = Duration::from_millis(100);
/// Delay before a left menu item hides its submenu, unless re-entered.
pub const SUBMENU_HIDE_DELAY: Duration = Duration::from_millis(200);
/// Clock refresh period.
pub const CLOCK_PERIOD: Duration = Duration::from_secs(60);
/// Lifetime of a transient notification toast.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(3);

/// Side effects the UI adapter applies after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskbarEffect {
    /// Move keyboard focus to the first focusable start-menu entry.
    FocusFirstMenuEntry,
    /// Focus the search input, selecting any existing text.
    FocusSearchInput,
    /// Clear the search input text.
    ClearSearchInput,
}

/// Where a document-level click landed, relative to the taskbar's overlays.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutsideClickHit {
    pub in_start_button: bool,
    pub in_start_menu: bool,
    pub in_search_button: bool,
    pub in_search_dialog: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp {
    Show,
    Hide,
}

/// Hover-debounce state for one menu item's submenu. Independent per item.
#[derive(Debug, Clone, Copy, Default)]
struct SubmenuSlot {
    visible: bool,
    pending: Option<PendingOp>,
    timer: Countdown,
}

/// A transient toast raised via the public notification API.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    expires: Instant,
}

/// A decorative "running application" entry in the tray.
#[derive(Debug, Clone)]
pub struct TaskbarApp {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub url: Option<String>,
}

pub struct TaskbarController {
    start_menu_open: bool,
    submenus: Vec<SubmenuSlot>,
    search_dialog_open: bool,

    clock_time: String,
    clock_date: String,
    clock_timer: Metronome,

    notifications: Vec<Notification>,
    apps: Vec<TaskbarApp>,
}

impl TaskbarController {
    /// `submenu_items` is the number of start-menu entries that carry a
    /// submenu; each gets its own hover slot.
    pub fn new(submenu_items: usize) -> Self {
        Self {
            start_menu_open: false,
            submenus: vec![SubmenuSlot::default(); submenu_items],
            search_dialog_open: false,
            clock_time: String::new(),
            clock_date: String::new(),
            clock_timer: Metronome::new(CLOCK_PERIOD),
            notifications: Vec::new(),
            apps: Vec::new(),
        }
    }

    // ----- start menu -----

    pub fn is_start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    pub fn toggle_start_menu(&mut self) -> Vec<TaskbarEffect> {
        if self.start_menu_open {
            self.close_start_menu();
            Vec::new()
        } else {
            self.open_start_menu()
        }
    }

    pub fn open_start_menu(&mut self) -> Vec<TaskbarEffect> {
        self.start_menu_open = true;
        vec![TaskbarEffect::FocusFirstMenuEntry]
    }

    /// Closing also force-hides every submenu and cancels pending hover ops.
    pub fn close_start_menu(&mut self) {
        self.start_menu_open = false;
        for slot in &mut self.submenus {
            slot.visible = false;
            slot.pending = None;
            slot.timer.cancel();
        }
    }

    pub fn is_submenu_visible(&self, item: usize) -> bool {
        self.submenus.get(item).map(|s| s.visible).unwrap_or(false)
    }

    pub fn submenu_pointer_enter(&mut self, item: usize, now: Instant) {
        let Some(slot) = self.submenus.get_mut(item) else {
            return;
        };
        // Re-entering cancels a pending hide. Only schedule a show when the
        // submenu is not already up.
        slot.pending = None;
        slot.timer.cancel();
        if !slot.visible {
            slot.pending = Some(PendingOp::Show);
            slot.timer.arm(now, SUBMENU_SHOW_DELAY);
        }
    }

    pub fn submenu_pointer_leave(&mut self, item: usize, now: Instant) {
        let Some(slot) = self.submenus.get_mut(item) else {
            return;
        };
        if slot.visible {
            slot.pending = Some(PendingOp::Hide);
            slot.timer.arm(now, SUBMENU_HIDE_DELAY);
        } else {
            // Pointer left before the show delay elapsed.
            slot.pending = None;
            slot.timer.cancel();
        }
    }

    // ----- search dialog -----

    pub fn is_search_dialog_open(&self) -> bool {
        self.search_dialog_open
    }

    pub fn open_search_dialog(&mut self) -> Vec<TaskbarEffect> {
        self.search_dialog_open = true;
        vec![TaskbarEffect::FocusSearchInput]
    }

    pub fn close_search_dialog(&mut self) -> Vec<TaskbarEffect> {
        if !self.search_dialog_open {
            return Vec::new();
        }
        self.search_dialog_open = false;
        vec![TaskbarEffect::ClearSearchInput]
    }

    // ----- document-level input -----

    /// Single document-level click handler: a click outside the start menu
    /// and its button closes the menu; a click outside the search dialog and
    /// its trigger closes the dialog.
    pub fn outside_click(&mut self, hit: OutsideClickHit) -> Vec<TaskbarEffect> {
        let mut effects = Vec::new();
        if self.start_menu_open && !hit.in_start_button && !hit.in_start_menu {
            self.close_start_menu();
        }
        if self.search_dialog_open && !hit.in_search_button && !hit.in_search_dialog {
            effects.extend(self.close_search_dialog());
        }
        effects
    }

    /// Escape closes whichever overlays are open.
    pub fn key_escape(&mut self) -> Vec<TaskbarEffect> {
        let mut effects = Vec::new();
        if self.search_dialog_open {
            effects.extend(self.close_search_dialog());
        }
        if self.start_menu_open {
            self.close_start_menu();
        }
        effects
    }

    /// Meta key, or Ctrl+Escape, toggles the start menu.
    pub fn key_menu_toggle(&mut self) -> Vec<TaskbarEffect> {
        self.toggle_start_menu()
    }

    // ----- clock -----

    pub fn clock_time(&self) -> &str {
        &self.clock_time
    }

    pub fn clock_date(&self) -> &str {
        &self.clock_date
    }

    /// Blocking full date/time disclosure raised by clicking the clock.
    pub fn clock_clicked<T: Datelike + Timelike>(&self, wall: &T) -> String {
        clock::full_disclosure(wall)
    }

    // ----- timers -----

    /// Advance all taskbar timers. Called once per frame.
    pub fn poll<T: Datelike + Timelike>(&mut self, now: Instant, wall: &T) {
        // Clock: refresh once at startup, then every minute.
        if !self.clock_timer.is_running() {
            self.clock_timer.start(now);
            self.refresh_clock(wall);
        } else if self.clock_timer.ticks(now) > 0 {
            self.refresh_clock(wall);
        }

        for slot in &mut self.submenus {
            if slot.timer.fire(now) {
                match slot.pending.take() {
                    Some(PendingOp::Show) => slot.visible = true,
                    Some(PendingOp::Hide) => slot.visible = false,
                    None => {}
                }
            }
        }

        self.notifications.retain(|n| now < n.expires);
    }

    fn refresh_clock<T: Datelike + Timelike>(&mut self, wall: &T) {
        self.clock_time = clock::short_time(wall);
        self.clock_date = clock::short_date(wall);
    }

    /// Earliest pending deadline, for repaint scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(
            self.submenus
                .iter()
                .map(|s| s.timer.deadline())
                .chain([self.clock_timer.deadline()])
                .chain(self.notifications.iter().map(|n| Some(n.expires))),
        )
    }

    /// Cancel every outstanding timer. Called before the controller is
    /// replaced on a section reload.
    pub fn dispose(&mut self) {
        for slot in &mut self.submenus {
            slot.pending = None;
            slot.timer.cancel();
        }
        self.clock_timer.stop();
        self.notifications.clear();
    }

    // ----- public API for other page scripts -----

    /// Show a toast above the taskbar, auto-dismissed after 3 seconds.
    pub fn show_notification(&mut self, message: impl Into<String>, now: Instant) {
        self.notifications.push(Notification {
            message: message.into(),
            expires: now + NOTIFICATION_LIFETIME,
        });
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Add a decorative running-application entry; returns its handle.
    pub fn add_app(
        &mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        url: Option<String>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.apps.push(TaskbarApp {
            id,
            name: name.into(),
            icon: icon.into(),
            url,
        });
        id
    }

    pub fn remove_app(&mut self, id: Uuid) -> bool {
        let before = self.apps.len();
        self.apps.retain(|a| a.id != id);
        self.apps.len() != before
    }

    pub fn apps(&self) -> &[TaskbarApp] {
        &self.apps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn wall() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, 4)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_start_menu_toggle_sequence() {
        let mut tb = TaskbarController::new(0);
        assert!(!tb.is_start_menu_open());
        let fx = tb.toggle_start_menu();
        assert!(tb.is_start_menu_open());
        assert_eq!(fx, vec![TaskbarEffect::FocusFirstMenuEntry]);
        tb.toggle_start_menu();
        assert!(!tb.is_start_menu_open());
        // Deterministic over a longer trigger sequence.
        tb.toggle_start_menu();
        tb.key_escape();
        assert!(!tb.is_start_menu_open());
        tb.key_menu_toggle();
        assert!(tb.is_start_menu_open());
        tb.key_menu_toggle();
        assert!(!tb.is_start_menu_open());
    }

    #[test]
    fn test_close_hides_all_submenus() {
        let t0 = Instant::now();
        let mut tb = TaskbarController::new(3);
        tb.open_start_menu();
        tb.submenu_pointer_enter(0, t0);
        tb.submenu_pointer_enter(2, t0);
        tb.poll(t0 + ms(150), &wall());
        assert!(tb.is_submenu_visible(0));
        assert!(tb.is_submenu_visible(2));

        tb.close_start_menu();
        for i in 0..3 {
            assert!(!tb.is_submenu_visible(i));
        }
        // No pending timer sneaks a submenu back open.
        tb.poll(t0 + ms(1000), &wall());
        assert!(!tb.is_submenu_visible(0));
    }

    #[test]
    fn test_submenu_show_after_delay() {
        let t0 = Instant::now();
        let mut tb = TaskbarController::new(1);
        tb.submenu_pointer_enter(0, t0);
        tb.poll(t0 + ms(99), &wall());
        assert!(!tb.is_submenu_visible(0));
        tb.poll(t0 + ms(100), &wall());
        assert!(tb.is_submenu_visible(0));
    }

    #[test]
    fn test_submenu_reenter_cancels_hide() {
        let t0 = Instant::now();
        let mut tb = TaskbarController::new(1);
        tb.submenu_pointer_enter(0, t0);
        tb.poll(t0 + ms(100), &wall());
        assert!(tb.is_submenu_visible(0));

        tb.submenu_pointer_leave(0, t0 + ms(100));
        tb.submenu_pointer_enter(0, t0 + ms(200));
        tb.poll(t0 + ms(400), &wall());
        assert!(tb.is_submenu_visible(0), "re-enter within 200ms keeps submenu open");

        tb.submenu_pointer_leave(0, t0 + ms(400));
        tb.poll(t0 + ms(599), &wall());
        assert!(tb.is_submenu_visible(0));
        tb.poll(t0 + ms(600), &wall());
        assert!(!tb.is_submenu_visible(0));
    }

    #[test]
    fn test_submenu_leave_before_show_cancels() {
        let t0 = Instant::now();
        let mut tb = TaskbarController::new(1);
        tb.submenu_pointer_enter(0, t0);
        tb.submenu_pointer_leave(0, t0 + ms(50));
        tb.poll(t0 + ms(500), &wall());
        assert!(!tb.is_submenu_visible(0));
    }

    #[test]
    fn test_submenu_slots_independent() {
        let t0 = Instant::now();
        let mut tb = TaskbarController::new(2);
        tb.submenu_pointer_enter(0, t0);
        tb.poll(t0 + ms(120), &wall());
        tb.submenu_pointer_enter(1, t0 + ms(120));
        tb.submenu_pointer_leave(0, t0 + ms(120));
        tb.poll(t0 + ms(260), &wall());
        assert!(tb.is_submenu_visible(1));
        tb.poll(t0 + ms(330), &wall());
        assert!(!tb.is_submenu_visible(0));
        assert!(tb.is_submenu_visible(1));
    }

    #[test]
    fn test_outside_click_closes_open_menu() {
        let mut tb = TaskbarController::new(0);
        tb.open_start_menu();
        tb.outside_click(OutsideClickHit {
            in_start_menu: true,
            ..Default::default()
        });
        assert!(tb.is_start_menu_open(), "click inside menu keeps it open");

        tb.outside_click(OutsideClickHit {
            in_start_button: true,
            ..Default::default()
        });
        assert!(tb.is_start_menu_open(), "click on the trigger keeps it open");

        tb.outside_click(OutsideClickHit::default());
        assert!(!tb.is_start_menu_open());
    }

    #[test]
    fn test_outside_click_closes_search_dialog() {
        let mut tb = TaskbarController::new(0);
        tb.open_search_dialog();
        let fx = tb.outside_click(OutsideClickHit::default());
        assert!(!tb.is_search_dialog_open());
        assert_eq!(fx, vec![TaskbarEffect::ClearSearchInput]);
    }

    #[test]
    fn test_search_dialog_open_close_effects() {
        let mut tb = TaskbarController::new(0);
        let fx = tb.open_search_dialog();
        assert_eq!(fx, vec![TaskbarEffect::FocusSearchInput]);
        let fx = tb.close_search_dialog();
        assert_eq!(fx, vec![TaskbarEffect::ClearSearchInput]);
        // Closing an already-closed dialog is a no-op.
        assert!(tb.close_search_dialog().is_empty());
    }

    #[test]
    fn test_escape_closes_both_overlays() {
        let mut tb = TaskbarController::new(0);
        tb.open_start_menu();
        tb.open_search_dialog();
        let fx = tb.key_escape();
        assert!(!tb.is_start_menu_open());
        assert!(!tb.is_search_dialog_open());
        assert_eq!(fx, vec![TaskbarEffect::ClearSearchInput]);
    }

    #[test]
    fn test_clock_renders_and_refreshes_each_minute() {
        let t0 = Instant::now();
        let mut tb = TaskbarController::new(0);
        tb.poll(t0, &wall());
        assert_eq!(tb.clock_time(), "2:05");
        assert_eq!(tb.clock_date(), "7/4");

        let later = NaiveDate::from_ymd_opt(2026, 7, 4)
            .unwrap()
            .and_hms_opt(14, 6, 0)
            .unwrap();
        // Before the minute elapses the display is untouched.
        tb.poll(t0 + Duration::from_secs(59), &later);
        assert_eq!(tb.clock_time(), "2:05");
        tb.poll(t0 + Duration::from_secs(60), &later);
        assert_eq!(tb.clock_time(), "2:06");
    }

    #[test]
    fn test_clock_disclosure() {
        let tb = TaskbarController::new(0);
        assert_eq!(
            tb.clock_clicked(&wall()),
            "Saturday, July 4, 2026\n2:05:00 PM"
        );
    }

    #[test]
    fn test_notification_expires() {
        let t0 = Instant::now();
        let mut tb = TaskbarController::new(0);
        tb.show_notification("Item added to cart", t0);
        tb.poll(t0 + ms(2999), &wall());
        assert_eq!(tb.notifications().len(), 1);
        tb.poll(t0 + ms(3000), &wall());
        assert!(tb.notifications().is_empty());
    }

    #[test]
    fn test_app_tray_add_remove() {
        let mut tb = TaskbarController::new(0);
        let id = tb.add_app("My Orders", "📦", Some("/account/orders".to_string()));
        assert_eq!(tb.apps().len(), 1);
        assert!(tb.remove_app(id));
        assert!(tb.apps().is_empty());
        assert!(!tb.remove_app(id));
    }

    #[test]
    fn test_dispose_cancels_all_timers() {
        let t0 = Instant::now();
        let mut tb = TaskbarController::new(2);
        tb.poll(t0, &wall());
        tb.submenu_pointer_enter(0, t0);
        tb.show_notification("hi", t0);
        assert!(tb.next_deadline().is_some());
        tb.dispose();
        assert!(tb.next_deadline().is_none());
    }
}
