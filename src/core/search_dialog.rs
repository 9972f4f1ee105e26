//! Win98-style decorative behavior layered on the search dialog: the
//! status-bar readout, the fake "searching" animation, the reset feedback,
//! the title-bar double-click maximize, and the system-sound placeholder.
//!
//! Independent of the taskbar's own open/close wiring for the same dialog;
//! both layers are kept, matching the storefront's two scripts.

use std::time::{Duration, Instant};

use super::timer::{earliest, Countdown, Metronome};

/// Period of the dot-cycling indicator on the search button.
pub const SEARCH_DOT_PERIOD: Duration = Duration::from_millis(500);
/// Total length of the decorative searching animation.
pub const SEARCH_ANIMATION_LENGTH: Duration = Duration::from_secs(3);
/// How long "Search cleared" stays up before reverting to "Ready".
pub const RESET_REVERT_DELAY: Duration = Duration::from_secs(1);
/// Length of the status-bar flash accompanying a system sound.
pub const SOUND_FLASH_LENGTH: Duration = Duration::from_millis(100);

/// Height of the simulated title-bar strip at the top of the dialog
/// content; double-clicks at or above this offset toggle maximize.
pub const TITLE_BAR_HEIGHT: f32 = 20.0;

/// Status-bar readout. Exactly one current value, no history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    EnterTerms,
    SearchingFor(String),
    Searching,
    Cleared,
    Complete,
}

impl Status {
    pub fn text(&self) -> String {
        match self {
            Status::Ready => "Ready".to_string(),
            Status::EnterTerms => "Enter search terms".to_string(),
            Status::SearchingFor(query) => format!("Searching for \"{}\"...", query),
            Status::Searching => "Searching...".to_string(),
            Status::Cleared => "Search cleared".to_string(),
            Status::Complete => "Search complete".to_string(),
        }
    }
}

/// Requests the UI adapter carries out on behalf of the keyboard layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEffect {
    /// Ctrl+F: proxy a click on the external search trigger.
    OpenDialogRequested,
    /// Escape while open: proxy a click on the close button.
    CloseDialogRequested,
    /// Enter in the input: proxy a click on the search button.
    TriggerSearchButton,
}

struct SearchAnimation {
    dots: u8,
    dot_timer: Metronome,
    finish: Countdown,
}

pub struct SearchDialogController {
    status: Status,
    animation: Option<SearchAnimation>,
    revert: Countdown,
    flash: Countdown,
    maximized: bool,
}

impl SearchDialogController {
    pub fn new() -> Self {
        Self {
            status: Status::Ready,
            animation: None,
            revert: Countdown::default(),
            flash: Countdown::default(),
            maximized: false,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn status_text(&self) -> String {
        self.status.text()
    }

    // ----- status-bar updates -----

    pub fn input_changed(&mut self, text: &str) {
        let query = text.trim();
        self.status = if query.is_empty() {
            Status::Ready
        } else {
            Status::SearchingFor(query.to_string())
        };
    }

    pub fn input_focused(&mut self) {
        self.status = Status::EnterTerms;
    }

    pub fn input_blurred(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.status = Status::Ready;
        }
    }

    // ----- search / reset feedback -----

    pub fn search_clicked(&mut self, now: Instant) {
        self.status = Status::Searching;
        let mut dot_timer = Metronome::new(SEARCH_DOT_PERIOD);
        dot_timer.start(now);
        let mut finish = Countdown::default();
        finish.arm(now, SEARCH_ANIMATION_LENGTH);
        self.animation = Some(SearchAnimation {
            dots: 0,
            dot_timer,
            finish,
        });
    }

    /// The dot indicator rendered on the search button while the decorative
    /// animation runs; `None` once it finishes.
    pub fn searching_indicator(&self) -> Option<String> {
        self.animation
            .as_ref()
            .map(|a| ".".repeat(a.dots as usize))
    }

    pub fn reset_clicked(&mut self, now: Instant) {
        self.status = Status::Cleared;
        self.revert.arm(now, RESET_REVERT_DELAY);
    }

    // ----- keyboard shortcuts -----

    /// Ctrl+F opens the dialog by proxying the external search trigger.
    pub fn key_ctrl_f(&self) -> SearchEffect {
        SearchEffect::OpenDialogRequested
    }

    /// Escape closes the dialog only when it is currently open.
    pub fn key_escape(&self, dialog_open: bool) -> Option<SearchEffect> {
        dialog_open.then_some(SearchEffect::CloseDialogRequested)
    }

    /// Enter while focus is in the search input triggers the search button.
    pub fn key_enter_in_input(&self) -> SearchEffect {
        SearchEffect::TriggerSearchButton
    }

    // ----- maximize -----

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Double-click on the dialog content; toggles maximize only when the
    /// click's vertical offset from the content's top edge falls within the
    /// simulated title-bar strip.
    pub fn title_bar_double_click(&mut self, offset_y: f32) -> bool {
        if offset_y < 0.0 || offset_y > TITLE_BAR_HEIGHT {
            return false;
        }
        self.maximized = !self.maximized;
        true
    }

    /// Dialog content size for the current maximize state. Maximized fills
    /// 95% x 90% of the screen; restored is capped at 600 wide and 80% of
    /// the screen height.
    pub fn dialog_size(&self, screen_width: f32, screen_height: f32) -> (f32, f32) {
        if self.maximized {
            (screen_width * 0.95, screen_height * 0.90)
        } else {
            (screen_width.min(600.0), screen_height * 0.80)
        }
    }

    // ----- decorative sound -----

    /// No real audio: log the sound label and flash the status bar briefly.
    pub fn play_system_sound(&mut self, sound_type: &str, now: Instant) {
        log::info!("Win98 {} sound", sound_type);
        self.flash.arm(now, SOUND_FLASH_LENGTH);
    }

    pub fn status_flash(&self, now: Instant) -> bool {
        self.flash.deadline().map(|t| now < t).unwrap_or(false)
    }

    // ----- timers -----

    pub fn poll(&mut self, now: Instant) {
        if let Some(anim) = &mut self.animation {
            let ticks = anim.dot_timer.ticks(now);
            for _ in 0..ticks {
                anim.dots = if anim.dots >= 3 { 0 } else { anim.dots + 1 };
            }
            if anim.finish.fire(now) {
                self.animation = None;
                self.status = Status::Complete;
            }
        }

        // Unconditional revert, as in the original: one second after a reset
        // the status returns to Ready regardless of what happened meanwhile.
        if self.revert.fire(now) {
            self.status = Status::Ready;
        }

        self.flash.fire(now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let anim_deadlines = self
            .animation
            .as_ref()
            .map(|a| earliest([a.dot_timer.deadline(), a.finish.deadline()]))
            .unwrap_or(None);
        earliest([anim_deadlines, self.revert.deadline(), self.flash.deadline()])
    }

    /// Cancel the animation and all pending timers. Called before the
    /// controller is replaced on a section reload.
    pub fn dispose(&mut self) {
        self.animation = None;
        self.revert.cancel();
        self.flash.cancel();
    }
}

impl Default for SearchDialogController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_input_updates_status() {
        let mut dlg = SearchDialogController::new();
        dlg.input_changed("widgets");
        assert_eq!(dlg.status_text(), "Searching for \"widgets\"...");
        dlg.input_changed("   ");
        assert_eq!(dlg.status_text(), "Ready");
    }

    #[test]
    fn test_focus_and_blur() {
        let mut dlg = SearchDialogController::new();
        dlg.input_focused();
        assert_eq!(dlg.status_text(), "Enter search terms");
        dlg.input_blurred("widgets");
        assert_eq!(dlg.status_text(), "Enter search terms");
        dlg.input_blurred("");
        assert_eq!(dlg.status_text(), "Ready");
    }

    #[test]
    fn test_search_animation_cycles_dots_then_completes() {
        let t0 = Instant::now();
        let mut dlg = SearchDialogController::new();
        dlg.search_clicked(t0);
        assert_eq!(dlg.status_text(), "Searching...");
        assert_eq!(dlg.searching_indicator().as_deref(), Some(""));

        dlg.poll(t0 + ms(500));
        assert_eq!(dlg.searching_indicator().as_deref(), Some("."));
        dlg.poll(t0 + ms(1000));
        assert_eq!(dlg.searching_indicator().as_deref(), Some(".."));
        dlg.poll(t0 + ms(1500));
        assert_eq!(dlg.searching_indicator().as_deref(), Some("..."));
        dlg.poll(t0 + ms(2000));
        assert_eq!(dlg.searching_indicator().as_deref(), Some(""));

        dlg.poll(t0 + ms(3000));
        assert_eq!(dlg.searching_indicator(), None);
        assert_eq!(dlg.status_text(), "Search complete");
    }

    #[test]
    fn test_reset_reverts_after_one_second() {
        let t0 = Instant::now();
        let mut dlg = SearchDialogController::new();
        dlg.reset_clicked(t0);
        assert_eq!(dlg.status_text(), "Search cleared");
        dlg.poll(t0 + ms(999));
        assert_eq!(dlg.status_text(), "Search cleared");
        dlg.poll(t0 + ms(1000));
        assert_eq!(dlg.status_text(), "Ready");
    }

    #[test]
    fn test_reset_revert_is_unconditional() {
        let t0 = Instant::now();
        let mut dlg = SearchDialogController::new();
        dlg.reset_clicked(t0);
        dlg.input_changed("shoes");
        assert_eq!(dlg.status_text(), "Searching for \"shoes\"...");
        dlg.poll(t0 + ms(1000));
        assert_eq!(dlg.status_text(), "Ready");
    }

    #[test]
    fn test_maximize_hit_test() {
        let mut dlg = SearchDialogController::new();
        assert!(!dlg.is_maximized());
        assert!(dlg.title_bar_double_click(10.0));
        assert!(dlg.is_maximized());
        assert!(!dlg.title_bar_double_click(30.0));
        assert!(dlg.is_maximized(), "double-click below the title strip is ignored");
        assert!(!dlg.title_bar_double_click(-2.0));
        assert!(dlg.is_maximized(), "double-click above the strip is ignored");
        assert!(dlg.title_bar_double_click(TITLE_BAR_HEIGHT));
        assert!(!dlg.is_maximized());
    }

    #[test]
    fn test_dialog_size() {
        let mut dlg = SearchDialogController::new();
        assert_eq!(dlg.dialog_size(1024.0, 768.0), (600.0, 768.0 * 0.80));
        dlg.title_bar_double_click(0.0);
        assert_eq!(dlg.dialog_size(1024.0, 768.0), (1024.0 * 0.95, 768.0 * 0.90));
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let dlg = SearchDialogController::new();
        assert_eq!(dlg.key_ctrl_f(), SearchEffect::OpenDialogRequested);
        assert_eq!(dlg.key_escape(true), Some(SearchEffect::CloseDialogRequested));
        assert_eq!(dlg.key_escape(false), None);
        assert_eq!(dlg.key_enter_in_input(), SearchEffect::TriggerSearchButton);
    }

    #[test]
    fn test_sound_flash_window() {
        let t0 = Instant::now();
        let mut dlg = SearchDialogController::new();
        dlg.play_system_sound("chord", t0);
        assert!(dlg.status_flash(t0));
        assert!(dlg.status_flash(t0 + ms(99)));
        dlg.poll(t0 + ms(100));
        assert!(!dlg.status_flash(t0 + ms(100)));
    }

    #[test]
    fn test_dispose_cancels_everything() {
        let t0 = Instant::now();
        let mut dlg = SearchDialogController::new();
        dlg.search_clicked(t0);
        dlg.reset_clicked(t0);
        dlg.play_system_sound("ding", t0);
        assert!(dlg.next_deadline().is_some());
        dlg.dispose();
        assert!(dlg.next_deadline().is_none());
        assert_eq!(dlg.searching_indicator(), None);
    }
}
