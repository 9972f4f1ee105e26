use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use chrono::Local;
use eframe::egui;
use uuid::Uuid;

use crate::config::{Config, ConfigManager, TaskbarDisplay, TaskbarPosition};
use crate::core::cart::{CartDispatcher, CartOutcome, CartSurface};
use crate::core::search_dialog::{SearchDialogController, SearchEffect, TITLE_BAR_HEIGHT};
use crate::core::taskbar::{OutsideClickHit, TaskbarController, TaskbarEffect};
use crate::core::timer;
use crate::theme;

/// What a start-menu entry does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Navigate(&'static str),
    OpenSearch,
    OpenCart,
    TaskbarTop,
    TaskbarBottom,
    PinOrders,
    ReloadTaskbarSection,
    ReloadHeaderSection,
    TestSound,
    ShutDown,
}

struct SubEntry {
    label: &'static str,
    action: MenuAction,
}

struct MenuItem {
    label: &'static str,
    icon: &'static str,
    action: Option<MenuAction>,
    submenu: &'static [SubEntry],
}

// Indexing matches the taskbar controller's submenu hover slots.
const START_MENU: &[MenuItem] = &[
    MenuItem {
        label: "Programs",
        icon: "📁",
        action: None,
        submenu: &[
            SubEntry { label: "Catalog", action: MenuAction::Navigate("/collections/all") },
            SubEntry { label: "New Arrivals", action: MenuAction::Navigate("/collections/new") },
            SubEntry { label: "Sale Items", action: MenuAction::Navigate("/collections/sale") },
        ],
    },
    MenuItem {
        label: "Documents",
        icon: "📄",
        action: None,
        submenu: &[
            SubEntry { label: "My Orders", action: MenuAction::Navigate("/account/orders") },
            SubEntry { label: "Wishlist", action: MenuAction::Navigate("/wishlist") },
        ],
    },
    MenuItem {
        label: "Settings",
        icon: "⚙",
        action: None,
        submenu: &[
            SubEntry { label: "Taskbar on Top", action: MenuAction::TaskbarTop },
            SubEntry { label: "Taskbar on Bottom", action: MenuAction::TaskbarBottom },
            SubEntry { label: "Pin My Orders", action: MenuAction::PinOrders },
            SubEntry { label: "Reload Taskbar Section", action: MenuAction::ReloadTaskbarSection },
            SubEntry { label: "Reload Header Section", action: MenuAction::ReloadHeaderSection },
            SubEntry { label: "Test System Sound", action: MenuAction::TestSound },
        ],
    },
    MenuItem {
        label: "Find",
        icon: "🔍",
        action: Some(MenuAction::OpenSearch),
        submenu: &[],
    },
    MenuItem {
        label: "Shopping Cart",
        icon: "🛒",
        action: Some(MenuAction::OpenCart),
        submenu: &[],
    },
    MenuItem {
        label: "Help",
        icon: "❓",
        action: Some(MenuAction::Navigate("/pages/help")),
        submenu: &[],
    },
    MenuItem {
        label: "Shut Down...",
        icon: "⏻",
        action: Some(MenuAction::ShutDown),
        submenu: &[],
    },
];

/// The in-process cart drawer, highest-priority cart surface.
struct DrawerSurface {
    open_flag: Rc<RefCell<bool>>,
}

impl CartSurface for DrawerSurface {
    fn name(&self) -> &str {
        "cart-drawer"
    }

    fn try_open(&mut self) -> bool {
        *self.open_flag.borrow_mut() = true;
        true
    }
}

/// Composition root: owns both controllers and adapts egui events into
/// state-machine transitions. No globals; a section reload disposes the old
/// controller before building its replacement.
pub struct Win98ShellApp {
    config_manager: ConfigManager,
    config: Config,

    taskbar: TaskbarController,
    search: SearchDialogController,

    search_text: String,
    meta_was_down: bool,
    focus_search_input: bool,
    focus_first_menu_entry: bool,
    clock_popup: Option<String>,
    last_navigation: Option<String>,

    cart_open: Rc<RefCell<bool>>,
    cart: CartDispatcher,
    orders_app: Option<Uuid>,

    // Hover edges and hit-test geometry carried across frames.
    menu_hovered: Vec<bool>,
    submenu_rects: Vec<Option<egui::Rect>>,
    start_button_rect: Option<egui::Rect>,
    start_menu_rect: Option<egui::Rect>,
    search_button_rect: Option<egui::Rect>,
    search_dialog_rect: Option<egui::Rect>,
}

impl Win98ShellApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config_manager = ConfigManager::new();
        let config = config_manager.load();

        let cart_open = Rc::new(RefCell::new(false));
        let mut cart = CartDispatcher::new(config.cart_url.clone());
        cart.register(Box::new(DrawerSurface {
            open_flag: cart_open.clone(),
        }));

        Self {
            config_manager,
            config,
            taskbar: TaskbarController::new(START_MENU.len()),
            search: SearchDialogController::new(),
            search_text: String::new(),
            meta_was_down: false,
            focus_search_input: false,
            focus_first_menu_entry: false,
            clock_popup: None,
            last_navigation: None,
            cart_open,
            cart,
            orders_app: None,
            menu_hovered: vec![false; START_MENU.len()],
            submenu_rects: vec![None; START_MENU.len()],
            start_button_rect: None,
            start_menu_rect: None,
            search_button_rect: None,
            search_dialog_rect: None,
        }
    }

    /// Host notification that a storefront section was re-rendered. The
    /// matching controller is disposed and rebuilt from scratch so no timer
    /// from the old instance survives.
    pub fn reload_section(&mut self, section_id: &str) {
        if section_id.contains("win98-taskbar") {
            log::info!("section '{}' reloaded, rebuilding taskbar", section_id);
            self.taskbar.dispose();
            self.taskbar = TaskbarController::new(START_MENU.len());
            self.menu_hovered = vec![false; START_MENU.len()];
            self.submenu_rects = vec![None; START_MENU.len()];
        }
        if section_id.contains("header") {
            log::info!("section '{}' reloaded, rebuilding search dialog", section_id);
            self.search.dispose();
            self.search = SearchDialogController::new();
        }
    }

    fn apply_taskbar_effects(&mut self, effects: Vec<TaskbarEffect>) {
        for effect in effects {
            match effect {
                TaskbarEffect::FocusFirstMenuEntry => self.focus_first_menu_entry = true,
                TaskbarEffect::FocusSearchInput => self.focus_search_input = true,
                TaskbarEffect::ClearSearchInput => self.search_text.clear(),
            }
        }
    }

    /// The storefront runs in a browser; here a navigation is surfaced as a
    /// toast plus a record for the host page to act on.
    fn navigate(&mut self, url: &str, now: Instant) {
        log::info!("navigate: {}", url);
        self.last_navigation = Some(url.to_string());
        self.taskbar.show_notification(format!("Opening {}", url), now);
    }

    fn open_cart(&mut self, now: Instant) {
        match self.cart.open() {
            CartOutcome::Opened(surface) => {
                log::debug!("cart opened by surface '{}'", surface);
            }
            CartOutcome::Navigated(url) => self.navigate(&url, now),
        }
    }

    fn run_menu_action(&mut self, action: MenuAction, ctx: &egui::Context, now: Instant) {
        match action {
            MenuAction::Navigate(url) => self.navigate(url, now),
            MenuAction::OpenSearch => {
                let fx = self.taskbar.open_search_dialog();
                self.apply_taskbar_effects(fx);
            }
            MenuAction::OpenCart => self.open_cart(now),
            MenuAction::TaskbarTop => self.set_position(TaskbarPosition::Top),
            MenuAction::TaskbarBottom => self.set_position(TaskbarPosition::Bottom),
            MenuAction::PinOrders => match self.orders_app.take() {
                Some(id) => {
                    self.taskbar.remove_app(id);
                }
                None => {
                    self.orders_app = Some(self.taskbar.add_app(
                        "My Orders",
                        "📦",
                        Some("/account/orders".to_string()),
                    ));
                }
            },
            MenuAction::ReloadTaskbarSection => self.reload_section("win98-taskbar-main"),
            MenuAction::ReloadHeaderSection => self.reload_section("header-main"),
            MenuAction::TestSound => self.search.play_system_sound("chord", now),
            MenuAction::ShutDown => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn set_position(&mut self, position: TaskbarPosition) {
        self.config.position = position;
        if let Err(e) = self.config_manager.save(&self.config) {
            log::warn!("failed to save config: {}", e);
        }
    }

    fn handle_global_keys(&mut self, ctx: &egui::Context) {
        let (escape, ctrl, f_pressed, meta_down) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.modifiers.ctrl || i.modifiers.mac_cmd,
                i.key_pressed(egui::Key::F),
                i.modifiers.mac_cmd,
            )
        });

        // The meta key arrives only as a modifier flag, so the menu toggle
        // fires on its press edge; Ctrl+Escape covers platforms where the
        // flag never shows up.
        let meta_pressed = meta_down && !self.meta_was_down;
        self.meta_was_down = meta_down;

        if meta_pressed || (escape && ctrl) {
            let fx = self.taskbar.key_menu_toggle();
            self.apply_taskbar_effects(fx);
        } else if escape {
            if let Some(SearchEffect::CloseDialogRequested) =
                self.search.key_escape(self.taskbar.is_search_dialog_open())
            {
                let fx = self.taskbar.close_search_dialog();
                self.apply_taskbar_effects(fx);
            }
            let fx = self.taskbar.key_escape();
            self.apply_taskbar_effects(fx);
        }

        if ctrl && f_pressed {
            if let SearchEffect::OpenDialogRequested = self.search.key_ctrl_f() {
                let fx = self.taskbar.open_search_dialog();
                self.apply_taskbar_effects(fx);
            }
        }
    }

    fn handle_outside_click(&mut self, ctx: &egui::Context) {
        let clicked = ctx.input(|i| {
            if i.pointer.primary_clicked() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        let Some(pos) = clicked else {
            return;
        };

        let contains = |rect: Option<egui::Rect>| rect.map(|r| r.contains(pos)).unwrap_or(false);
        let in_submenu = self.submenu_rects.iter().any(|r| contains(*r));
        let hit = OutsideClickHit {
            in_start_button: contains(self.start_button_rect),
            in_start_menu: contains(self.start_menu_rect) || in_submenu,
            in_search_button: contains(self.search_button_rect),
            in_search_dialog: contains(self.search_dialog_rect),
        };
        let fx = self.taskbar.outside_click(hit);
        self.apply_taskbar_effects(fx);
    }

    // ----- taskbar panel -----

    fn ui_taskbar(&mut self, ctx: &egui::Context, now: Instant, wall: &chrono::DateTime<Local>) {
        let display = self.config.taskbar_display(ctx.screen_rect().width());
        if display == TaskbarDisplay::Hidden {
            self.start_button_rect = None;
            self.search_button_rect = None;
            self.taskbar.close_start_menu();
            return;
        }
        let mini = display == TaskbarDisplay::Mini;

        let (top_inset, bottom_inset) = self.config.content_inset();
        let height = top_inset.max(bottom_inset);
        let panel = match self.config.position {
            TaskbarPosition::Top => egui::TopBottomPanel::top("win98-taskbar"),
            TaskbarPosition::Bottom => egui::TopBottomPanel::bottom("win98-taskbar"),
        };

        panel
            .exact_height(height)
            .frame(egui::Frame::none().fill(theme::face()))
            .show(ctx, |ui| {
                theme::paint_bevel(ui.painter(), ui.max_rect(), true);

                ui.horizontal_centered(|ui| {
                    ui.add_space(2.0);
                    let start = ui.add(egui::Button::new(egui::RichText::new("⊞ Start").strong()));
                    self.start_button_rect = Some(start.rect);
                    if start.clicked() {
                        let fx = self.taskbar.toggle_start_menu();
                        self.apply_taskbar_effects(fx);
                    }

                    ui.separator();

                    // Running-application tray; dropped in the compact mode.
                    if !mini {
                        let apps: Vec<_> = self
                            .taskbar
                            .apps()
                            .iter()
                            .map(|a| (a.icon.clone(), a.name.clone(), a.url.clone()))
                            .collect();
                        for (icon, name, url) in apps {
                            if ui.button(format!("{} {}", icon, name)).clicked() {
                                if let Some(url) = url {
                                    self.navigate(&url, now);
                                }
                            }
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_space(2.0);

                        // System clock: h:mm over m/d (time only in compact
                        // mode); click for the full date/time disclosure.
                        let clock_label = if mini {
                            self.taskbar.clock_time().to_string()
                        } else {
                            format!(
                                "{}\n{}",
                                self.taskbar.clock_time(),
                                self.taskbar.clock_date()
                            )
                        };
                        let clock =
                            ui.add(egui::Button::new(egui::RichText::new(clock_label).size(10.0)));
                        theme::paint_bevel(ui.painter(), clock.rect, false);
                        if clock.clicked() {
                            self.clock_popup = Some(self.taskbar.clock_clicked(wall));
                        }

                        if ui.button("🛒 Cart").clicked() {
                            self.open_cart(now);
                        }

                        let search = ui.button("🔍 Find");
                        self.search_button_rect = Some(search.rect);
                        if search.clicked() {
                            let fx = self.taskbar.open_search_dialog();
                            self.apply_taskbar_effects(fx);
                        }
                    });
                });
            });
    }

    // ----- start menu and submenus -----

    fn ui_start_menu(&mut self, ctx: &egui::Context, now: Instant) {
        if !self.taskbar.is_start_menu_open() {
            self.start_menu_rect = None;
            self.submenu_rects.fill(None);
            self.menu_hovered.fill(false);
            self.focus_first_menu_entry = false;
            return;
        }

        let anchor = self.start_button_rect.unwrap_or(egui::Rect::NOTHING);
        let (pivot, pos) = match self.config.position {
            TaskbarPosition::Bottom => (egui::Align2::LEFT_BOTTOM, anchor.left_top()),
            TaskbarPosition::Top => (egui::Align2::LEFT_TOP, anchor.left_bottom()),
        };

        let mut item_rects: Vec<egui::Rect> = Vec::with_capacity(START_MENU.len());
        let mut activated: Option<MenuAction> = None;

        let response = egui::Area::new(egui::Id::new("start-menu"))
            .order(egui::Order::Foreground)
            .pivot(pivot)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                theme::raised_frame().show(ui, |ui| {
                    ui.set_min_width(180.0);
                    ui.label(
                        egui::RichText::new(" Win98 Storefront ")
                            .color(theme::highlight())
                            .background_color(theme::title_blue())
                            .strong(),
                    );
                    ui.separator();

                    for (i, item) in START_MENU.iter().enumerate() {
                        let text = if item.submenu.is_empty() {
                            format!("{} {}", item.icon, item.label)
                        } else {
                            format!("{} {} ▸", item.icon, item.label)
                        };
                        let resp = ui.add_sized(
                            [172.0, 22.0],
                            egui::SelectableLabel::new(self.taskbar.is_submenu_visible(i), text),
                        );
                        if i == 0 && self.focus_first_menu_entry {
                            resp.request_focus();
                            self.focus_first_menu_entry = false;
                        }
                        item_rects.push(resp.rect);
                        if resp.clicked() {
                            if let Some(action) = item.action {
                                activated = Some(action);
                            }
                        }
                    }
                });
            });
        self.start_menu_rect = Some(response.response.rect);

        // Submenu fly-outs for whatever the controller says is visible.
        for (i, item) in START_MENU.iter().enumerate() {
            if item.submenu.is_empty() || !self.taskbar.is_submenu_visible(i) {
                self.submenu_rects[i] = None;
                continue;
            }
            let item_rect = item_rects.get(i).copied().unwrap_or(egui::Rect::NOTHING);
            let sub = egui::Area::new(egui::Id::new(("submenu", i)))
                .order(egui::Order::Foreground)
                .fixed_pos(item_rect.right_top())
                .show(ctx, |ui| {
                    theme::raised_frame().show(ui, |ui| {
                        ui.set_min_width(150.0);
                        for entry in item.submenu {
                            let resp = ui
                                .add_sized([146.0, 20.0], egui::SelectableLabel::new(false, entry.label));
                            if resp.clicked() {
                                activated = Some(entry.action);
                            }
                        }
                    });
                });
            self.submenu_rects[i] = Some(sub.response.rect);
        }

        // Hover edges: an item counts as hovered while the pointer is over
        // it or over its open fly-out, matching the nested-markup hover of
        // the original menu.
        let pointer = ctx.pointer_latest_pos();
        for i in 0..START_MENU.len() {
            let over_item = pointer
                .map(|p| item_rects.get(i).map(|r| r.contains(p)).unwrap_or(false))
                .unwrap_or(false);
            let over_submenu = pointer
                .map(|p| self.submenu_rects[i].map(|r| r.contains(p)).unwrap_or(false))
                .unwrap_or(false);
            let hovered = over_item || over_submenu;
            if hovered && !self.menu_hovered[i] {
                self.taskbar.submenu_pointer_enter(i, now);
            } else if !hovered && self.menu_hovered[i] {
                self.taskbar.submenu_pointer_leave(i, now);
            }
            self.menu_hovered[i] = hovered;
        }

        if let Some(action) = activated {
            self.taskbar.close_start_menu();
            self.run_menu_action(action, ctx, now);
        }
    }

    // ----- search dialog -----

    fn ui_search_dialog(&mut self, ctx: &egui::Context, now: Instant) {
        if !self.taskbar.is_search_dialog_open() {
            self.search_dialog_rect = None;
            return;
        }

        let screen = ctx.screen_rect();
        let (width, max_height) = self.search.dialog_size(screen.width(), screen.height());
        let maximized = self.search.is_maximized();

        let mut close_requested = false;
        let mut window = egui::Window::new("search-dialog")
            .id(egui::Id::new("search-dialog"))
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .frame(
                egui::Frame::none()
                    .fill(theme::face())
                    .stroke(egui::Stroke::new(1.0, theme::dark_shadow()))
                    .inner_margin(3.0),
            )
            .pivot(egui::Align2::CENTER_CENTER)
            .default_pos(screen.center());
        window = if maximized {
            window
                .fixed_size(egui::vec2(width, max_height))
                .current_pos(screen.center())
        } else {
            window.fixed_size(egui::vec2(width.min(440.0), max_height.min(200.0)))
        };

        let inner = window.show(ctx, |ui| {
            // Simulated title bar: the top strip of the content area.
            let (title_rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), TITLE_BAR_HEIGHT),
                egui::Sense::hover(),
            );
            ui.painter()
                .rect_filled(title_rect, 0.0, theme::title_blue());
            ui.painter().text(
                title_rect.left_center() + egui::vec2(4.0, 0.0),
                egui::Align2::LEFT_CENTER,
                "Find: Products",
                egui::FontId::proportional(12.0),
                theme::highlight(),
            );
            let close_rect = egui::Rect::from_min_size(
                title_rect.right_top() + egui::vec2(-18.0, 2.0),
                egui::vec2(16.0, 16.0),
            );
            if ui.put(close_rect, egui::Button::new("✕").small()).clicked() {
                close_requested = true;
            }

            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label("Named:");
                let output = egui::TextEdit::singleline(&mut self.search_text)
                    .id(egui::Id::new("search-input"))
                    .desired_width(f32::INFINITY)
                    .hint_text("Enter search terms")
                    .show(ui);
                let resp = output.response;

                if self.focus_search_input {
                    resp.request_focus();
                    // Select any existing text, like the original's
                    // focus-then-select on open.
                    let len = self.search_text.chars().count();
                    let mut state = output.state;
                    state.cursor.set_char_range(Some(egui::text::CCursorRange::two(
                        egui::text::CCursor::new(0),
                        egui::text::CCursor::new(len),
                    )));
                    state.store(ui.ctx(), resp.id);
                    self.focus_search_input = false;
                }

                if resp.changed() {
                    let text = self.search_text.clone();
                    self.search.input_changed(&text);
                }
                if resp.gained_focus() {
                    self.search.input_focused();
                }
                if resp.lost_focus() {
                    if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        // Enter proxies a click on the search button.
                        if let SearchEffect::TriggerSearchButton = self.search.key_enter_in_input()
                        {
                            self.search.search_clicked(now);
                        }
                    } else {
                        let text = self.search_text.clone();
                        self.search.input_blurred(&text);
                    }
                }
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let label = match self.search.searching_indicator() {
                    Some(dots) => format!("Search Now{}", dots),
                    None => "Search Now".to_string(),
                };
                if ui.add_sized([110.0, 22.0], egui::Button::new(label)).clicked() {
                    self.search.search_clicked(now);
                }
                if ui
                    .add_sized([90.0, 22.0], egui::Button::new("New Search"))
                    .clicked()
                {
                    // Form reset clears the input without an input event.
                    self.search_text.clear();
                    self.search.reset_clicked(now);
                }
                if ui.add_sized([70.0, 22.0], egui::Button::new("Cancel")).clicked() {
                    close_requested = true;
                }
            });

            if maximized {
                // Maximized dialogs keep their footprint; push the status
                // bar to the bottom edge.
                ui.allocate_space(egui::vec2(
                    ui.available_width(),
                    (ui.available_height() - 26.0).max(0.0),
                ));
            }

            ui.add_space(4.0);

            let fill = if self.search.status_flash(now) {
                theme::flash_yellow()
            } else {
                theme::face()
            };
            theme::sunken_frame().fill(fill).show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(
                    egui::RichText::new(self.search.status_text())
                        .size(10.0)
                        .color(egui::Color32::BLACK),
                );
            });

            title_rect
        });

        if let Some(inner) = inner {
            let rect = inner.response.rect;
            self.search_dialog_rect = Some(rect);

            // Title-bar hit test: a double-click within the painted title
            // strip toggles maximize. The offset is measured from the
            // strip's own top edge, not the window rect's, so the frame
            // margin above the strip stays dead.
            let double_click_pos = ctx.input(|i| {
                if i.pointer.button_double_clicked(egui::PointerButton::Primary) {
                    i.pointer.interact_pos()
                } else {
                    None
                }
            });
            if let Some(pos) = double_click_pos {
                if rect.contains(pos) {
                    let title_top = inner.inner.map(|r| r.top()).unwrap_or(rect.top());
                    self.search.title_bar_double_click(pos.y - title_top);
                }
            }
        }

        if close_requested {
            let fx = self.taskbar.close_search_dialog();
            self.apply_taskbar_effects(fx);
        }
    }

    // ----- the rest of the chrome -----

    fn ui_cart_drawer(&mut self, ctx: &egui::Context) {
        if !*self.cart_open.borrow() {
            return;
        }
        let mut close = false;
        egui::SidePanel::right("cart-drawer")
            .default_width(240.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(" Shopping Cart ")
                        .color(theme::highlight())
                        .background_color(theme::title_blue())
                        .strong(),
                );
                ui.separator();
                ui.label("Your cart is empty.");
                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        if close {
            *self.cart_open.borrow_mut() = false;
        }
    }

    fn ui_clock_popup(&mut self, ctx: &egui::Context) {
        let Some(text) = self.clock_popup.clone() else {
            return;
        };
        let mut dismiss = false;
        egui::Window::new("Date/Time")
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::CENTER_CENTER)
            .default_pos(ctx.screen_rect().center())
            .show(ctx, |ui| {
                for line in text.lines() {
                    ui.label(line);
                }
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismiss = true;
                    }
                });
            });
        if dismiss {
            self.clock_popup = None;
        }
    }

    fn ui_notifications(&mut self, ctx: &egui::Context) {
        let messages: Vec<String> = self
            .taskbar
            .notifications()
            .iter()
            .map(|n| n.message.clone())
            .collect();
        for (i, message) in messages.iter().enumerate() {
            egui::Area::new(egui::Id::new(("taskbar-notification", i)))
                .order(egui::Order::Tooltip)
                .pivot(egui::Align2::RIGHT_BOTTOM)
                .fixed_pos(
                    ctx.screen_rect().right_bottom() + egui::vec2(-10.0, -(35.0 + 30.0 * i as f32)),
                )
                .show(ctx, |ui| {
                    egui::Frame::none()
                        .fill(theme::tooltip_bg())
                        .stroke(egui::Stroke::new(2.0, theme::shadow()))
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(message)
                                    .size(11.0)
                                    .color(egui::Color32::BLACK),
                            );
                        });
                });
        }
    }

    fn ui_desktop(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme::desktop()))
            .show(ctx, |ui| {
                if let Some(url) = &self.last_navigation {
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new(format!("Last page: {}", url))
                                .color(theme::highlight()),
                        );
                    });
                }
            });
    }
}

impl eframe::App for Win98ShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let wall = Local::now();

        self.taskbar.poll(now, &wall);
        self.search.poll(now);
        self.handle_global_keys(ctx);

        self.ui_taskbar(ctx, now, &wall);
        self.ui_desktop(ctx);
        self.ui_cart_drawer(ctx);
        self.ui_start_menu(ctx, now);
        self.ui_search_dialog(ctx, now);
        self.ui_clock_popup(ctx);
        self.ui_notifications(ctx);

        self.handle_outside_click(ctx);

        // Wake up exactly when the next timer is due.
        if let Some(deadline) =
            timer::earliest([self.taskbar.next_deadline(), self.search.next_deadline()])
        {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}
