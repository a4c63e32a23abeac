//! UI navigator
//!
//! A screen state machine driven by debounced button edges. Each tick
//! [`Navigator::update`] consumes input, mutates the motor runtime and
//! the stores through a [`UiContext`], and tracks whether the frame is
//! stale. [`Navigator::render`] turns the current screen into draw
//! requests; it reads navigator state plus a [`RenderView`] snapshot and
//! never mutates anything.
//!
//! # Layouts
//!
//! | action            | four-button      | three-button        |
//! |-------------------|------------------|---------------------|
//! | confirm           | Right            | Select              |
//! | back              | Left             | "Back" list item    |
//! | open menu (Home)  | Right            | short Select        |
//! | start/stop (Home) | menu item        | long Select         |
//! | diagnostics       | Left on Home     | boot chord only     |
//!
//! # Settle windows
//!
//! Some confirms open a short window during which every button edge is
//! consumed and dropped, so a bouncing or held key cannot fire twice
//! across a screen change. The loop keeps ticking throughout.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::{ButtonLayout, DeviceConfig, MAX_PROFILES};
use crate::i18n::{Language, Localizer, TextKey};
use crate::input::InputBank;
use crate::motor::{MotorRuntime, MotorStatus, SystemSettings};
use crate::profile::{MotorProfile, ProfileName, ProfileStore};
use crate::traits::{Button, KeyValueStore, MotorPort, RenderSink};

use super::autotest::{AutoTest, AutoTestOutcome, AutoTestPhase, AUTOTEST_CYCLES};
use super::list::ListCursor;
use super::menu::{main_menu, MenuAction, MenuItems, MenuState};
use super::name_editor::NameEditor;
use super::screen::{Screen, WizardStep};

/// Intro splash duration
pub const INTRO_MS: u32 = 900;

const MENU_OPEN_SETTLE_MS: u32 = 150;
const MENU_CONFIRM_SETTLE_MS: u32 = 100;
const RUN_TOGGLE_SETTLE_MS: u32 = 200;

/// Name editor cursor blink half-period
const BLINK_MS: u32 = 500;

const MAX_CLOCK_STEP_HZ: u32 = 1000;
const MAX_CLOCK_CEILING_HZ: u32 = 200_000;

/// Longest list the navigator draws (main menu)
const MAX_LIST: usize = 12;

type Line = String<32>;

/// Everything the navigator mutates during a tick
pub struct UiContext<'c, 'a, P, S> {
    pub input: &'c mut InputBank,
    pub motor: &'c mut MotorRuntime<'a, P>,
    pub profiles: &'c mut ProfileStore<S>,
    pub settings: &'c mut SystemSettings,
}

/// Read-only state needed to draw a frame
pub struct RenderView<'v> {
    pub status: &'v MotorStatus,
    pub profile: &'v MotorProfile,
    pub settings: &'v SystemSettings,
    /// Debounced button levels, [`Button::ALL`] order
    pub levels: [bool; 4],
}

/// UI state machine
pub struct Navigator {
    layout: ButtonLayout,
    autotest_enabled: bool,
    speed_repeat_ms: u32,

    screen: Screen,
    list: ListCursor,
    menu: MenuItems,
    /// Profile names, captured on entering SelectMotor
    names: Vec<ProfileName, MAX_PROFILES>,

    draft: MotorProfile,
    editor: NameEditor,
    save_choice: bool,
    autotest: Option<AutoTest>,

    intro_start_ms: u32,
    settle_start_ms: u32,
    settle_ms: u32,
    last_speed_step_ms: u32,
    /// Three-button Home: Select went down, menu opens on release
    select_pending: bool,

    dirty: bool,
    live: bool,
    now_ms: u32,
}

impl Navigator {
    /// Create the navigator at boot
    ///
    /// With the boot chord (Up+Down held) the intro is skipped and
    /// Diagnostics opens directly.
    pub fn new(config: &DeviceConfig, boot_chord: bool, now_ms: u32) -> Self {
        let screen = if boot_chord {
            info!("Boot chord held, opening diagnostics");
            Screen::Diagnostics
        } else {
            Screen::Intro
        };

        Self {
            layout: config.layout,
            autotest_enabled: config.autotest,
            speed_repeat_ms: config.timing.speed_repeat_ms,
            screen,
            list: ListCursor::default(),
            menu: MenuItems::new(),
            names: Vec::new(),
            draft: MotorProfile::default(),
            editor: NameEditor::new(),
            save_choice: true,
            autotest: None,
            intro_start_ms: now_ms,
            settle_start_ms: now_ms,
            settle_ms: 0,
            last_speed_step_ms: now_ms,
            select_pending: false,
            dirty: true,
            live: screen.is_live(false),
            now_ms,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Whether the next render would differ from the last one drawn
    pub fn needs_redraw(&self) -> bool {
        self.dirty || self.live
    }

    pub fn mark_drawn(&mut self) {
        self.dirty = false;
    }

    /// Force a redraw (e.g. new RPM sample on Home)
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Process one tick of input and timers
    pub fn update<P: MotorPort, S: KeyValueStore>(
        &mut self,
        now_ms: u32,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        self.now_ms = now_ms;

        if self.settle_ms > 0 {
            if now_ms.wrapping_sub(self.settle_start_ms) < self.settle_ms {
                ctx.input.drain();
                return;
            }
            self.settle_ms = 0;
        }

        match self.screen {
            Screen::Intro => self.update_intro(now_ms, ctx),
            Screen::Home => self.update_home(now_ms, ctx),
            Screen::Menu => self.update_menu(now_ms, ctx),
            Screen::SelectMotor => self.update_select_motor(ctx),
            Screen::Wizard(step) => self.update_wizard(step, ctx),
            Screen::Settings => self.update_settings(ctx),
            Screen::SettingsLanguage => self.update_language(ctx),
            Screen::SettingsTelemetry => self.update_telemetry(ctx),
            Screen::About => self.update_about(ctx),
            Screen::Diagnostics => self.update_diagnostics(ctx),
            Screen::AutoTest => self.update_autotest(now_ms, ctx),
        }

        self.live = self.screen.is_live(ctx.motor.is_running());
    }

    fn go(&mut self, screen: Screen) {
        if screen != self.screen {
            debug!("Screen {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
        self.dirty = true;
    }

    fn settle(&mut self, now_ms: u32, ms: u32) {
        self.settle_start_ms = now_ms;
        self.settle_ms = ms;
    }

    fn confirm_pressed(&self, input: &mut InputBank) -> bool {
        input.consume_press(self.layout.confirm_button())
    }

    fn back_pressed(&self, input: &mut InputBank) -> bool {
        match self.layout.back_button() {
            Some(button) => input.consume_press(button),
            None => false,
        }
    }

    /// Up/Down over a list of `len` entries
    fn move_list(&mut self, input: &mut InputBank, len: usize) {
        if input.consume_press(Button::Up) && self.list.up() {
            self.dirty = true;
        }
        if input.consume_press(Button::Down) && self.list.down(len) {
            self.dirty = true;
        }
    }

    /// Length of a list with the layout's optional trailing Back item
    fn with_back(&self, len: usize) -> usize {
        len + usize::from(self.layout.has_back_items())
    }

    fn update_intro<P: MotorPort, S: KeyValueStore>(
        &mut self,
        now_ms: u32,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        ctx.input.drain();
        if now_ms.wrapping_sub(self.intro_start_ms) >= INTRO_MS {
            self.go(Screen::Home);
        }
    }

    fn speed_step_allowed(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_speed_step_ms) > self.speed_repeat_ms {
            self.last_speed_step_ms = now_ms;
            true
        } else {
            false
        }
    }

    fn update_home<P: MotorPort, S: KeyValueStore>(
        &mut self,
        now_ms: u32,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        if ctx.input.consume_press(Button::Up) && self.speed_step_allowed(now_ms) {
            ctx.motor.step_speed_up();
            self.dirty = true;
        }
        if ctx.input.consume_press(Button::Down) && self.speed_step_allowed(now_ms) {
            ctx.motor.step_speed_down();
            self.dirty = true;
        }

        match self.layout {
            ButtonLayout::FourButton => {
                if ctx.input.consume_press(Button::Left) {
                    self.go(Screen::Diagnostics);
                } else if ctx.input.consume_press(Button::Right) {
                    self.open_menu(ctx);
                    self.settle(now_ms, MENU_OPEN_SETTLE_MS);
                }
            }
            ButtonLayout::ThreeButton => {
                let select = self.layout.confirm_button();
                if ctx.input.consume_press(select) {
                    self.select_pending = true;
                }

                if ctx.input.consume_long_press(select) {
                    self.select_pending = false;
                    ctx.motor.toggle_running();
                    self.dirty = true;
                    self.settle(now_ms, RUN_TOGGLE_SETTLE_MS);
                } else if self.select_pending && !ctx.input.is_low(select) {
                    self.select_pending = false;
                    self.open_menu(ctx);
                    self.settle(now_ms, MENU_OPEN_SETTLE_MS);
                }
            }
        }
    }

    fn rebuild_menu<P: MotorPort, S: KeyValueStore>(&mut self, ctx: &UiContext<'_, '_, P, S>) {
        let motor = &*ctx.motor;
        let state = MenuState {
            running: motor.is_running(),
            clockwise: motor.direction().is_clockwise(),
            has_brake: motor.profile().has_brake,
            brake_engaged: motor.brake_engaged(),
            enable_command: motor
                .can_command_enable()
                .then(|| motor.enable_command()),
            profile_count: ctx.profiles.count(),
            autotest: self.autotest_enabled,
            back_item: self.layout.has_back_items(),
        };
        self.menu = main_menu(&state);
        self.list.clamp(self.menu.len());
    }

    fn open_menu<P: MotorPort, S: KeyValueStore>(&mut self, ctx: &UiContext<'_, '_, P, S>) {
        self.rebuild_menu(ctx);
        self.list.reset(0, self.menu.len());
        self.go(Screen::Menu);
    }

    fn update_menu<P: MotorPort, S: KeyValueStore>(
        &mut self,
        now_ms: u32,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        self.rebuild_menu(ctx);
        self.move_list(ctx.input, self.menu.len());

        if self.back_pressed(ctx.input) {
            self.go(Screen::Home);
            return;
        }

        if self.confirm_pressed(ctx.input) {
            let Some(&(_, action)) = self.menu.get(self.list.index()) else {
                return;
            };
            self.settle(now_ms, MENU_CONFIRM_SETTLE_MS);
            self.run_menu_action(action, now_ms, ctx);
        }
    }

    fn run_menu_action<P: MotorPort, S: KeyValueStore>(
        &mut self,
        action: MenuAction,
        now_ms: u32,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        debug!("Menu action {:?}", action);

        match action {
            MenuAction::StartStop => {
                ctx.motor.toggle_running();
                self.go(Screen::Home);
            }
            MenuAction::ToggleDirection => {
                ctx.motor.toggle_direction();
                self.go(Screen::Home);
            }
            MenuAction::ToggleBrake => {
                ctx.motor.toggle_brake();
                self.go(Screen::Home);
            }
            MenuAction::ToggleEnable => {
                ctx.motor.toggle_enable();
                self.go(Screen::Home);
            }
            MenuAction::AutoTest => {
                self.autotest = Some(AutoTest::begin(ctx.motor, now_ms));
                self.go(Screen::AutoTest);
            }
            MenuAction::SelectMotor => {
                self.names.clear();
                for idx in 0..ctx.profiles.count() {
                    let _ = self.names.push(ctx.profiles.name_of(idx));
                }
                let active = ctx.profiles.active_index().unwrap_or(0);
                self.list.reset(active, self.with_back(self.names.len()));
                self.go(Screen::SelectMotor);
            }
            MenuAction::AddMotor => {
                self.draft = MotorProfile::default();
                self.editor = NameEditor::new();
                self.save_choice = true;
                self.go(Screen::Wizard(WizardStep::Name));
            }
            MenuAction::DeleteActive => {
                if let Some(idx) = ctx.profiles.active_index() {
                    match ctx.profiles.remove(idx) {
                        Ok(()) => info!("Deleted profile {}", idx),
                        Err(e) => warn!("Failed to delete profile {}: {:?}", idx, e),
                    }
                }
                let profile = ctx.profiles.load_active().unwrap_or_default();
                ctx.motor.apply_profile(profile);
                self.go(Screen::Home);
            }
            MenuAction::Settings => {
                self.list.reset(0, self.with_back(2));
                self.go(Screen::Settings);
            }
            MenuAction::About => self.go(Screen::About),
            MenuAction::Back => self.go(Screen::Home),
        }
    }

    fn update_select_motor<P: MotorPort, S: KeyValueStore>(
        &mut self,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        if self.names.is_empty() {
            self.open_menu(ctx);
            return;
        }

        self.move_list(ctx.input, self.with_back(self.names.len()));

        if self.back_pressed(ctx.input) {
            self.open_menu(ctx);
            return;
        }

        if self.confirm_pressed(ctx.input) {
            let idx = self.list.index();
            if idx >= self.names.len() {
                self.open_menu(ctx);
                return;
            }

            if let Err(e) = ctx.profiles.set_active(idx) {
                warn!("Failed to store active profile: {:?}", e);
            }
            match ctx.profiles.load_active() {
                Ok(profile) => ctx.motor.apply_profile(profile),
                Err(e) => warn!("Failed to load profile {}: {:?}", idx, e),
            }
            self.go(Screen::Home);
        }
    }

    fn update_wizard<P: MotorPort, S: KeyValueStore>(
        &mut self,
        step: WizardStep,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        if self.back_pressed(ctx.input) {
            info!("Add motor cancelled");
            self.open_menu(ctx);
            return;
        }

        let up = ctx.input.consume_press(Button::Up);
        let down = ctx.input.consume_press(Button::Down);
        let confirm = self.confirm_pressed(ctx.input);

        if up || down {
            self.dirty = true;
        }

        match step {
            WizardStep::Name => {
                if up {
                    self.editor.up();
                }
                if down {
                    self.editor.down();
                }
                if confirm {
                    self.dirty = true;
                    if let Some(name) = self.editor.confirm() {
                        self.draft.name = name;
                        self.advance(step);
                    }
                }
            }
            WizardStep::Ppr => {
                let ppr = &mut self.draft.pulses_per_rev;
                if up {
                    *ppr = ppr.saturating_add(1);
                }
                if down && *ppr > 1 {
                    *ppr -= 1;
                }
                if confirm {
                    self.advance(step);
                }
            }
            WizardStep::MaxClock => {
                let max = &mut self.draft.max_clock_hz;
                if up {
                    *max = (*max + MAX_CLOCK_STEP_HZ).min(MAX_CLOCK_CEILING_HZ);
                }
                if down && *max > MAX_CLOCK_STEP_HZ {
                    *max -= MAX_CLOCK_STEP_HZ;
                }
                if confirm {
                    self.advance(step);
                }
            }
            WizardStep::Save => {
                if up || down {
                    self.save_choice = !self.save_choice;
                }
                if confirm {
                    if self.save_choice {
                        self.save_draft(ctx);
                    } else {
                        info!("Add motor discarded");
                    }
                    self.save_choice = true;
                    self.go(Screen::Home);
                }
            }
            _ => {
                if let Some(flag) = flag_mut(&mut self.draft, step) {
                    if up || down {
                        *flag = !*flag;
                    }
                }
                if confirm {
                    self.advance(step);
                }
            }
        }
    }

    fn advance(&mut self, step: WizardStep) {
        if let Some(next) = step.next(&self.draft) {
            self.go(Screen::Wizard(next));
        }
    }

    fn save_draft<P: MotorPort, S: KeyValueStore>(&mut self, ctx: &mut UiContext<'_, '_, P, S>) {
        let idx = match ctx.profiles.append(&self.draft) {
            Ok(idx) => idx,
            Err(e) => {
                warn!("Profile not saved: {:?}", e);
                return;
            }
        };

        info!("Saved profile {} in slot {}", self.draft.name.as_str(), idx);
        if let Err(e) = ctx.profiles.set_active(idx) {
            warn!("Failed to store active profile: {:?}", e);
        }
        match ctx.profiles.load_active() {
            Ok(profile) => ctx.motor.apply_profile(profile),
            Err(e) => warn!("Failed to reload saved profile: {:?}", e),
        }
    }

    fn open_settings(&mut self) {
        self.list.reset(0, self.with_back(2));
        self.go(Screen::Settings);
    }

    fn update_settings<P: MotorPort, S: KeyValueStore>(
        &mut self,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        self.move_list(ctx.input, self.with_back(2));

        if self.back_pressed(ctx.input) {
            self.open_menu(ctx);
            return;
        }

        if self.confirm_pressed(ctx.input) {
            match self.list.index() {
                0 => {
                    let current = ctx.settings.language.index();
                    self.list
                        .reset(current, self.with_back(Language::ALL.len()));
                    self.go(Screen::SettingsLanguage);
                }
                1 => {
                    self.list.reset(0, self.with_back(1));
                    self.go(Screen::SettingsTelemetry);
                }
                _ => self.open_menu(ctx),
            }
        }
    }

    fn update_language<P: MotorPort, S: KeyValueStore>(
        &mut self,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        self.move_list(ctx.input, self.with_back(Language::ALL.len()));

        if self.back_pressed(ctx.input) {
            self.open_settings();
            return;
        }

        if self.confirm_pressed(ctx.input) {
            match Language::ALL.get(self.list.index()) {
                Some(&language) => {
                    if let Err(e) = ctx.settings.set_language(ctx.profiles.kv_mut(), language) {
                        warn!("Failed to store language: {:?}", e);
                    }
                    self.go(Screen::Home);
                }
                None => self.open_settings(),
            }
        }
    }

    fn update_telemetry<P: MotorPort, S: KeyValueStore>(
        &mut self,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        self.move_list(ctx.input, self.with_back(1));

        if self.back_pressed(ctx.input) {
            self.open_settings();
            return;
        }

        if self.confirm_pressed(ctx.input) {
            if self.list.index() == 0 {
                let enabled = !ctx.settings.telemetry;
                if let Err(e) = ctx.settings.set_telemetry(ctx.profiles.kv_mut(), enabled) {
                    warn!("Failed to store telemetry flag: {:?}", e);
                }
                self.dirty = true;
            } else {
                self.open_settings();
            }
        }
    }

    fn update_about<P: MotorPort, S: KeyValueStore>(&mut self, ctx: &mut UiContext<'_, '_, P, S>) {
        let back = self.back_pressed(ctx.input);
        let confirm = self.confirm_pressed(ctx.input);
        if back || confirm {
            self.open_menu(ctx);
        }
    }

    fn update_diagnostics<P: MotorPort, S: KeyValueStore>(
        &mut self,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        let exit = match self.layout.back_button() {
            Some(button) => ctx.input.consume_press(button),
            None => ctx.input.consume_long_press(self.layout.confirm_button()),
        };
        if exit {
            self.go(Screen::Home);
        }
    }

    fn update_autotest<P: MotorPort, S: KeyValueStore>(
        &mut self,
        now_ms: u32,
        ctx: &mut UiContext<'_, '_, P, S>,
    ) {
        let Some(test) = self.autotest.as_mut() else {
            self.go(Screen::Home);
            return;
        };

        let abort = match self.layout.back_button() {
            Some(button) => ctx.input.consume_press(button),
            None => ctx.input.consume_press(self.layout.confirm_button()),
        };
        if abort {
            test.abort(ctx.motor);
            self.autotest = None;
            self.go(Screen::Home);
            return;
        }

        match test.tick(ctx.motor, now_ms) {
            AutoTestOutcome::Running => {}
            AutoTestOutcome::Finished | AutoTestOutcome::Alarm => {
                self.autotest = None;
                self.go(Screen::Home);
            }
        }
    }

    /// Emit draw requests for the current screen
    pub fn render(&self, sink: &mut impl RenderSink, text: &impl Localizer, view: &RenderView<'_>) {
        let labels = Labels {
            text,
            language: view.settings.language,
        };

        sink.begin();
        match self.screen {
            Screen::Intro => {
                sink.header(labels.get(TextKey::HomeTitle));
                sink.status(labels.get(TextKey::IntroBanner));
            }
            Screen::Home => self.render_home(sink, &labels, view),
            Screen::Menu => {
                let mut items: Vec<&str, MAX_LIST> = Vec::new();
                for &(key, _) in self.menu.iter() {
                    let _ = items.push(labels.get(key));
                }
                sink.header(labels.get(TextKey::MenuTitle));
                self.render_list(sink, &labels, &items);
                sink.footer(labels.get(self.menu_footer()));
            }
            Screen::SelectMotor => {
                let mut items: Vec<&str, MAX_LIST> = Vec::new();
                for name in self.names.iter() {
                    let _ = items.push(name.as_str());
                }
                sink.header(labels.get(TextKey::MenuSelectMotor));
                self.render_list(sink, &labels, &items);
                sink.footer(labels.get(self.menu_footer()));
            }
            Screen::Wizard(step) => self.render_wizard(sink, &labels, step),
            Screen::Settings => {
                let items = [
                    labels.get(TextKey::SettingsLanguage),
                    labels.get(TextKey::SettingsTelemetry),
                ];
                sink.header(labels.get(TextKey::SettingsTitle));
                self.render_list(sink, &labels, &items);
                sink.footer(labels.get(self.menu_footer()));
            }
            Screen::SettingsLanguage => {
                let items = [
                    labels.get(TextKey::LanguageEnglish),
                    labels.get(TextKey::LanguageSpanish),
                ];
                sink.header(labels.get(TextKey::SettingsLanguage));
                self.render_list(sink, &labels, &items);
                sink.footer(labels.get(self.layout_key(TextKey::HintChoice)));
            }
            Screen::SettingsTelemetry => {
                let item = if view.settings.telemetry {
                    TextKey::TelemetryOn
                } else {
                    TextKey::TelemetryOff
                };
                sink.header(labels.get(TextKey::SettingsTelemetry));
                self.render_list(sink, &labels, &[labels.get(item)]);
                sink.footer(labels.get(self.menu_footer()));
            }
            Screen::About => {
                sink.header(labels.get(TextKey::AboutTitle));
                sink.status(labels.get(TextKey::AboutAuthor));
                sink.status(labels.get(TextKey::AboutVersion));
            }
            Screen::Diagnostics => self.render_diagnostics(sink, &labels, view),
            Screen::AutoTest => self.render_autotest(sink, &labels, view),
        }
        sink.finish();
    }

    /// Pick the three-button variant of a footer or hint
    fn layout_key(&self, key: TextKey) -> TextKey {
        if self.layout == ButtonLayout::FourButton {
            return key;
        }
        match key {
            TextKey::FooterHome => TextKey::FooterHomeSelect,
            TextKey::FooterMenu => TextKey::FooterMenuSelect,
            TextKey::HintYesNo => TextKey::HintYesNoSelect,
            TextKey::HintChoice => TextKey::HintChoiceSelect,
            TextKey::HintNumber => TextKey::HintNumberSelect,
            TextKey::HintText => TextKey::HintTextSelect,
            TextKey::DiagHint => TextKey::DiagHintSelect,
            TextKey::AutoTestHint => TextKey::AutoTestHintSelect,
            other => other,
        }
    }

    fn menu_footer(&self) -> TextKey {
        self.layout_key(TextKey::FooterMenu)
    }

    /// Draw a list, appending the Back item when the layout has one
    fn render_list<L: Localizer + ?Sized>(
        &self,
        sink: &mut impl RenderSink,
        labels: &Labels<'_, L>,
        items: &[&str],
    ) {
        let mut all: Vec<&str, MAX_LIST> = Vec::new();
        for &item in items {
            let _ = all.push(item);
        }
        if self.layout.has_back_items() && self.screen != Screen::Menu {
            let _ = all.push(labels.get(TextKey::MenuBack));
        }
        sink.list(&all, self.list.index(), self.list.scroll());
    }

    fn render_home<L: Localizer + ?Sized>(
        &self,
        sink: &mut impl RenderSink,
        labels: &Labels<'_, L>,
        view: &RenderView<'_>,
    ) {
        let status = view.status;
        let profile = view.profile;
        let on_off = |on: bool| labels.get(if on { TextKey::On } else { TextKey::Off });

        sink.header(labels.get(TextKey::HomeTitle));
        sink.status(labels.get(if status.running {
            TextKey::Running
        } else {
            TextKey::Stopped
        }));

        let mut line = Line::new();
        if profile.has_fg {
            let _ = write!(line, "{} {}", labels.get(TextKey::Rpm), status.rpm);
            sink.status(&line);
        }

        line.clear();
        let _ = write!(
            line,
            "{} {}/{} Hz",
            labels.get(TextKey::Speed),
            status.current_hz,
            status.target_hz
        );
        sink.status(&line);

        line.clear();
        let _ = write!(
            line,
            "{}{}",
            labels.get(TextKey::Dir),
            labels.get(if status.clockwise { TextKey::Cw } else { TextKey::Ccw })
        );
        if profile.has_brake {
            let _ = write!(
                line,
                "  {}{}",
                labels.get(TextKey::Brake),
                on_off(status.brake_engaged)
            );
        }
        sink.status(&line);

        if profile.has_enable || profile.has_ld {
            line.clear();
            if profile.has_enable {
                let _ = write!(line, "{}{}", labels.get(TextKey::Enable), on_off(status.enabled));
            }
            if profile.has_ld {
                let state = if status.faulted {
                    TextKey::Alarm
                } else {
                    TextKey::Ok
                };
                let sep = if line.is_empty() { "" } else { "  " };
                let _ = write!(line, "{}{}{}", sep, labels.get(TextKey::Ld), labels.get(state));
            }
            sink.status(&line);
        }

        sink.footer(labels.get(self.layout_key(TextKey::FooterHome)));
    }

    fn render_wizard<L: Localizer + ?Sized>(
        &self,
        sink: &mut impl RenderSink,
        labels: &Labels<'_, L>,
        step: WizardStep,
    ) {
        let d = &self.draft;
        let yes_no = |on: bool| labels.get(if on { TextKey::Yes } else { TextKey::No });
        let low_high = |high: bool| labels.get(if high { TextKey::High } else { TextKey::Low });

        let mut value = Line::new();
        let (prompt, hint) = match step {
            WizardStep::Name => {
                let blink_on = (self.now_ms / BLINK_MS) % 2 == 0;
                let _ = value.push_str(&self.editor.line(blink_on));
                (TextKey::WizardName, TextKey::HintText)
            }
            WizardStep::Ppr => {
                let _ = write!(value, "{}", d.pulses_per_rev);
                (TextKey::WizardPpr, TextKey::HintNumber)
            }
            WizardStep::MaxClock => {
                let _ = write!(value, "{}", d.max_clock_hz);
                (TextKey::WizardMaxClock, TextKey::HintNumber)
            }
            WizardStep::Save => {
                let _ = value.push_str(yes_no(self.save_choice));
                (TextKey::WizardSave, TextKey::HintYesNo)
            }
            WizardStep::LdLevel => {
                let _ = value.push_str(low_high(!d.ld_active_low));
                (TextKey::WizardLdLevel, TextKey::HintChoice)
            }
            WizardStep::StopLevel => {
                let _ = value.push_str(low_high(d.stop_active_high));
                (TextKey::WizardStopLevel, TextKey::HintChoice)
            }
            WizardStep::EnableLevel => {
                let _ = value.push_str(low_high(d.enable_active_high));
                (TextKey::WizardEnableLevel, TextKey::HintChoice)
            }
            WizardStep::HasBrake => {
                let _ = value.push_str(yes_no(d.has_brake));
                (TextKey::WizardHasBrake, TextKey::HintYesNo)
            }
            WizardStep::HasFg => {
                let _ = value.push_str(yes_no(d.has_fg));
                (TextKey::WizardHasFg, TextKey::HintYesNo)
            }
            WizardStep::HasLd => {
                let _ = value.push_str(yes_no(d.has_ld));
                (TextKey::WizardHasLd, TextKey::HintYesNo)
            }
            WizardStep::HasStop => {
                let _ = value.push_str(yes_no(d.has_stop));
                (TextKey::WizardHasStop, TextKey::HintYesNo)
            }
            WizardStep::HasEnable => {
                let _ = value.push_str(yes_no(d.has_enable));
                (TextKey::WizardHasEnable, TextKey::HintYesNo)
            }
        };

        sink.header(labels.get(TextKey::MenuAddMotor));
        sink.prompt(labels.get(prompt), &value);
        sink.footer(labels.get(self.layout_key(hint)));
    }

    fn render_diagnostics<L: Localizer + ?Sized>(
        &self,
        sink: &mut impl RenderSink,
        labels: &Labels<'_, L>,
        view: &RenderView<'_>,
    ) {
        let [up, down, left, right] = view.levels.map(u8::from);
        let status = view.status;

        sink.header(labels.get(TextKey::DiagTitle));

        let mut line = Line::new();
        let _ = match self.layout {
            ButtonLayout::FourButton => {
                write!(line, "U:{} D:{} L:{} R:{}", up, down, left, right)
            }
            ButtonLayout::ThreeButton => write!(line, "U:{} D:{} S:{}", up, down, left),
        };
        sink.status(&line);

        line.clear();
        let _ = write!(
            line,
            "LD:{} FG-rpm:{}",
            u8::from(status.faulted),
            status.rpm
        );
        sink.status(&line);

        line.clear();
        let _ = write!(
            line,
            "Hz:{} DIR:{}",
            status.current_hz,
            labels.get(if status.clockwise { TextKey::Cw } else { TextKey::Ccw })
        );
        sink.status(&line);

        sink.footer(labels.get(self.layout_key(TextKey::DiagHint)));
    }

    fn render_autotest<L: Localizer + ?Sized>(
        &self,
        sink: &mut impl RenderSink,
        labels: &Labels<'_, L>,
        view: &RenderView<'_>,
    ) {
        sink.header(labels.get(TextKey::AutoTestTitle));

        if let Some(test) = &self.autotest {
            let mut line = Line::new();
            let shown = (test.cycle() + 1).min(AUTOTEST_CYCLES);
            let _ = write!(
                line,
                "{} {}/{}",
                labels.get(TextKey::AutoTestCycle),
                shown,
                AUTOTEST_CYCLES
            );
            sink.status(&line);

            sink.status(labels.get(match test.phase() {
                AutoTestPhase::Forward => TextKey::PhaseForward,
                AutoTestPhase::ShortPause => TextKey::PhaseShortPause,
                AutoTestPhase::Reverse => TextKey::PhaseReverse,
                AutoTestPhase::LongPause => TextKey::PhaseLongPause,
            }));

            line.clear();
            let _ = write!(
                line,
                "{} {} Hz",
                labels.get(TextKey::Speed),
                view.status.current_hz
            );
            sink.status(&line);
        }

        sink.footer(labels.get(self.layout_key(TextKey::AutoTestHint)));
    }
}

/// Localizer bound to the active language
struct Labels<'l, L: ?Sized> {
    text: &'l L,
    language: Language,
}

impl<L: Localizer + ?Sized> Labels<'_, L> {
    fn get(&self, key: TextKey) -> &'static str {
        self.text.text(self.language, key)
    }
}

/// The boolean a yes/no or polarity wizard step edits
fn flag_mut(draft: &mut MotorProfile, step: WizardStep) -> Option<&mut bool> {
    let flag = match step {
        WizardStep::HasBrake => &mut draft.has_brake,
        WizardStep::HasFg => &mut draft.has_fg,
        WizardStep::HasLd => &mut draft.has_ld,
        WizardStep::LdLevel => &mut draft.ld_active_low,
        WizardStep::HasStop => &mut draft.has_stop,
        WizardStep::StopLevel => &mut draft.stop_active_high,
        WizardStep::HasEnable => &mut draft.has_enable,
        WizardStep::EnableLevel => &mut draft.enable_active_high,
        WizardStep::Name | WizardStep::Ppr | WizardStep::MaxClock | WizardStep::Save => {
            return None
        }
    };
    Some(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnablePolicy;
    use crate::i18n::BuiltinText;
    use crate::input::InputTiming;
    use crate::motor::{speed, PulseCounter, DEFAULT_TARGET_HZ};
    use crate::profile::name_from;
    use crate::testing::{FrameLog, MemoryStore, RecordingPort, ScriptedButtons};
    use crate::traits::{KeyValueStore, StorageKey};
    use std::boxed::Box;

    struct Rig {
        raw: ScriptedButtons,
        input: InputBank,
        motor: MotorRuntime<'static, RecordingPort>,
        profiles: ProfileStore<MemoryStore>,
        settings: SystemSettings,
        nav: Navigator,
        now: u32,
    }

    impl Rig {
        fn with(config: DeviceConfig, kv: MemoryStore, held: &[Button]) -> Self {
            let pulses: &'static PulseCounter = Box::leak(Box::new(PulseCounter::new()));
            let mut raw = ScriptedButtons::default();
            for &button in held {
                raw.press(button);
            }

            let timing = InputTiming {
                debounce_ms: config.timing.debounce_ms,
                long_press_ms: config.timing.long_press_ms,
            };
            let input = InputBank::new(&mut raw, timing, config.layout.confirm_button());
            let boot_chord = input.is_low(Button::Up) && input.is_low(Button::Down);

            let mut profiles = ProfileStore::open(kv);
            let settings = SystemSettings::load(profiles.kv_mut());

            let mut port = RecordingPort::default();
            port.fault_high = true;
            let mut motor = MotorRuntime::new(
                port,
                pulses,
                config.enable_policy,
                config.timing.rpm_window_ms,
            );
            motor.apply_profile(profiles.load_active().unwrap_or_default());

            Self {
                raw,
                input,
                motor,
                profiles,
                settings,
                nav: Navigator::new(&config, boot_chord, 0),
                now: 0,
            }
        }

        /// Booted past the intro, English text
        fn booted(config: DeviceConfig, kv: MemoryStore) -> Self {
            let mut rig = Self::with(config, kv, &[]);
            rig.settings.language = Language::English;
            rig.idle(1000);
            assert_eq!(rig.nav.screen(), Screen::Home);
            rig
        }

        fn four() -> Self {
            Self::booted(DeviceConfig::default(), MemoryStore::default())
        }

        fn three() -> Self {
            Self::booted(three_button(), MemoryStore::default())
        }

        fn tick(&mut self) {
            self.now += 5;
            self.input.poll(&mut self.raw, self.now);
            let mut ctx = UiContext {
                input: &mut self.input,
                motor: &mut self.motor,
                profiles: &mut self.profiles,
                settings: &mut self.settings,
            };
            self.nav.update(self.now, &mut ctx);
        }

        fn idle(&mut self, ms: u32) {
            for _ in 0..ms / 5 {
                self.tick();
            }
        }

        /// Hold a button, release it, then let settle windows expire
        fn hold(&mut self, button: Button, ms: u32) {
            self.raw.press(button);
            self.idle(ms);
            self.raw.release(button);
            self.idle(250);
        }

        fn press(&mut self, button: Button) {
            self.hold(button, 80);
        }

        fn press_n(&mut self, button: Button, n: usize) {
            for _ in 0..n {
                self.press(button);
            }
        }

        fn frame(&mut self) -> FrameLog {
            let status = self.motor.status();
            let view = RenderView {
                status: &status,
                profile: self.motor.profile(),
                settings: &self.settings,
                levels: self.input.levels(),
            };
            let mut log = FrameLog::default();
            self.nav.render(&mut log, &BuiltinText, &view);
            log
        }

        /// Four-button: open the menu and confirm the entry labelled `label`
        fn menu_select(&mut self, label: &str) {
            self.press(Button::Right);
            assert_eq!(self.nav.screen(), Screen::Menu);
            let frame = self.frame();
            let idx = frame
                .items
                .iter()
                .position(|item| item == label)
                .unwrap_or_else(|| panic!("{label} not in {:?}", frame.items));
            self.press_n(Button::Down, idx);
            self.press(Button::Right);
        }
    }

    fn three_button() -> DeviceConfig {
        DeviceConfig {
            layout: ButtonLayout::ThreeButton,
            ..Default::default()
        }
    }

    fn store_with(profiles: &[MotorProfile]) -> MemoryStore {
        let mut store = ProfileStore::open(MemoryStore::default());
        for p in profiles {
            store.append(p).unwrap();
        }
        core::mem::take(store.kv_mut())
    }

    fn named(name: &str) -> MotorProfile {
        MotorProfile {
            name: name_from(name),
            ..Default::default()
        }
    }

    #[test]
    fn test_intro_then_home() {
        let mut rig = Rig::with(DeviceConfig::default(), MemoryStore::default(), &[]);
        rig.settings.language = Language::English;
        assert_eq!(rig.nav.screen(), Screen::Intro);

        let frame = rig.frame();
        assert_eq!(frame.header, "Motor Tester");
        assert!(frame.has_status("Motor Tester v2"));

        rig.idle(850);
        assert_eq!(rig.nav.screen(), Screen::Intro);
        rig.idle(100);
        assert_eq!(rig.nav.screen(), Screen::Home);
    }

    #[test]
    fn test_boot_chord_opens_diagnostics() {
        let mut rig = Rig::with(
            DeviceConfig::default(),
            MemoryStore::default(),
            &[Button::Up, Button::Down],
        );
        assert_eq!(rig.nav.screen(), Screen::Diagnostics);

        let frame = rig.frame();
        assert!(frame.has_status("U:1 D:1 L:0 R:0"));
        assert!(frame.has_status("LD:0 FG-rpm:0"));
        assert!(frame.has_status("Hz:0 DIR:CW"));

        rig.raw.release(Button::Up);
        rig.raw.release(Button::Down);
        rig.idle(100);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Home);
    }

    #[test]
    fn test_four_button_home_navigation() {
        let mut rig = Rig::four();

        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::Menu);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Home);

        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Diagnostics);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Home);
    }

    #[test]
    fn test_home_render() {
        let mut rig = Rig::four();
        let frame = rig.frame();
        assert_eq!(frame.header, "Motor Tester");
        assert_eq!(
            frame.status,
            ["STOPPED", "Speed: 0/1000 Hz", "DIR:CW"]
        );
        assert_eq!(frame.footer, "UP/DN:Speed L:Diag R:Menu");
    }

    #[test]
    fn test_home_render_optional_lines() {
        let profile = MotorProfile {
            has_fg: true,
            has_brake: true,
            has_ld: true,
            ..named("Full")
        };
        let mut rig = Rig::booted(DeviceConfig::default(), store_with(&[profile]));
        let frame = rig.frame();
        assert_eq!(
            frame.status,
            [
                "STOPPED",
                "RPM: 0",
                "Speed: 0/1000 Hz",
                "DIR:CW  BRAKE:OFF",
                "LD:OK"
            ]
        );

        rig.motor.port_mut().fault_high = false;
        assert!(rig.frame().has_status("LD:ALARM"));
    }

    #[test]
    fn test_menu_start_stop() {
        let mut rig = Rig::four();
        rig.menu_select("Start Motor");
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert!(rig.motor.is_running());
        assert_eq!(rig.motor.current_hz(), DEFAULT_TARGET_HZ);

        rig.press(Button::Right);
        assert_eq!(rig.frame().items[0], "Stop Motor");
        rig.press(Button::Right);
        assert!(!rig.motor.is_running());
    }

    #[test]
    fn test_menu_direction_toggle() {
        let mut rig = Rig::four();
        rig.menu_select("Set DIR = CCW");
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert!(!rig.motor.direction().is_clockwise());

        rig.press(Button::Right);
        assert_eq!(rig.frame().items[1], "Set DIR = CW");
    }

    #[test]
    fn test_menu_items_follow_profile() {
        let profile = MotorProfile {
            has_brake: true,
            has_enable: true,
            ..named("Braked")
        };
        let config = DeviceConfig {
            enable_policy: EnablePolicy::Commanded,
            ..Default::default()
        };
        let mut rig = Rig::booted(config, store_with(&[profile]));
        rig.press(Button::Right);
        assert_eq!(
            rig.frame().items,
            [
                "Start Motor",
                "Set DIR = CCW",
                "Brake ON",
                "Enable OFF",
                "Auto Test",
                "Select Motor",
                "Add Motor",
                "Delete Active",
                "Language/Telemetry",
                "About"
            ]
        );

        rig.press(Button::Left);
        rig.menu_select("Brake ON");
        assert!(rig.motor.brake_engaged());
        rig.menu_select("Enable OFF");
        assert!(!rig.motor.enable_command());
    }

    #[test]
    fn test_menu_scrolls_with_highlight() {
        let mut rig = Rig::four();
        rig.press(Button::Right);
        rig.press_n(Button::Down, 4);
        let frame = rig.frame();
        assert_eq!(frame.highlighted, 4);
        assert_eq!(frame.scroll_offset, 2);

        // clamped at the end
        rig.press_n(Button::Down, 5);
        assert_eq!(rig.frame().highlighted, frame.items.len() - 1);
    }

    #[test]
    fn test_speed_steps_on_home() {
        let mut rig = Rig::four();
        rig.press(Button::Up);
        assert_eq!(rig.motor.target_hz(), speed::step_up(1000, 20_000));
        rig.press(Button::Down);
        rig.press(Button::Down);
        assert_eq!(rig.motor.target_hz(), 900);
        // not running: the clock stays off
        assert_eq!(rig.motor.current_hz(), 0);
    }

    #[test]
    fn test_speed_steps_rate_limited() {
        let mut config = DeviceConfig::default();
        config.timing.debounce_ms = 10;
        let mut rig = Rig::booted(config, MemoryStore::default());

        // two edges about 40 ms apart
        rig.raw.press(Button::Up);
        rig.idle(20);
        rig.raw.release(Button::Up);
        rig.idle(20);
        rig.raw.press(Button::Up);
        rig.idle(20);
        rig.raw.release(Button::Up);
        rig.idle(300);
        assert_eq!(rig.motor.target_hz(), 1500);

        rig.press(Button::Up);
        assert_eq!(rig.motor.target_hz(), 2000);
    }

    #[test]
    fn test_settle_drops_presses_after_menu_open() {
        let mut rig = Rig::four();
        rig.raw.press(Button::Right);
        rig.idle(60);
        // lands inside the 150 ms settle window
        rig.raw.press(Button::Down);
        rig.idle(80);
        rig.raw.release(Button::Right);
        rig.raw.release(Button::Down);
        rig.idle(300);

        assert_eq!(rig.nav.screen(), Screen::Menu);
        assert_eq!(rig.frame().highlighted, 0);
    }

    /// Four-button: walk to the Save step keeping every default
    fn wizard_to_save(rig: &mut Rig) {
        rig.menu_select("Add Motor");
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::Name));
        // End on an empty buffer
        rig.press(Button::Down);
        rig.press(Button::Down);
        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::HasBrake));
        rig.press_n(Button::Right, 7);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::Save));
    }

    #[test]
    fn test_wizard_saves_and_activates() {
        let mut rig = Rig::four();
        rig.menu_select("Add Motor");

        // "A", then End
        rig.press(Button::Up);
        rig.press(Button::Right);
        rig.press(Button::Down);
        rig.press(Button::Down);
        let frame = rig.frame();
        assert_eq!(frame.header, "Add Motor");
        assert_eq!(
            frame.prompt,
            Some(("Name:".into(), "A[END]".into()))
        );
        rig.press(Button::Right);

        // has brake
        rig.press(Button::Up);
        assert_eq!(rig.frame().prompt.unwrap().1, "YES");
        rig.press(Button::Right);
        // FG, LD, STOP, ENABLE left off
        rig.press_n(Button::Right, 4);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::Ppr));
        rig.press(Button::Up);
        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::MaxClock));
        rig.press(Button::Down);
        assert_eq!(rig.frame().prompt.unwrap().1, "19000");
        rig.press(Button::Right);
        assert_eq!(rig.frame().prompt.unwrap(), ("Save profile?".into(), "YES".into()));
        rig.press(Button::Right);

        assert_eq!(rig.nav.screen(), Screen::Home);
        assert_eq!(rig.profiles.count(), 1);
        assert_eq!(rig.profiles.active_index(), Some(0));
        let p = rig.motor.profile();
        assert_eq!(p.name.as_str(), "A");
        assert!(p.has_brake);
        assert_eq!(p.pulses_per_rev, 7);
        assert_eq!(p.max_clock_hz, 19_000);
    }

    #[test]
    fn test_wizard_empty_name_falls_back() {
        let mut rig = Rig::four();
        wizard_to_save(&mut rig);
        rig.press(Button::Right);
        assert_eq!(rig.profiles.count(), 1);
        assert_eq!(rig.motor.profile().name.as_str(), "Motor");
    }

    #[test]
    fn test_wizard_save_no_discards() {
        let mut rig = Rig::four();
        wizard_to_save(&mut rig);
        rig.press(Button::Up);
        assert_eq!(rig.frame().prompt.unwrap().1, "NO");
        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert_eq!(rig.profiles.count(), 0);

        // choice resets for the next run
        wizard_to_save(&mut rig);
        assert_eq!(rig.frame().prompt.unwrap().1, "YES");
    }

    #[test]
    fn test_wizard_full_store_returns_home() {
        let full: std::vec::Vec<_> = (0..MAX_PROFILES).map(|i| named(&std::format!("M{i}"))).collect();
        let mut rig = Rig::booted(DeviceConfig::default(), store_with(&full));
        rig.motor.set_direction(crate::motor::Direction::CounterClockwise);

        wizard_to_save(&mut rig);
        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert_eq!(rig.profiles.count(), MAX_PROFILES);
        // runtime untouched
        assert_eq!(rig.motor.profile().name.as_str(), "M0");
        assert!(!rig.motor.direction().is_clockwise());
    }

    #[test]
    fn test_wizard_visits_level_steps() {
        let mut rig = Rig::four();
        rig.menu_select("Add Motor");
        rig.press(Button::Down);
        rig.press(Button::Down);
        rig.press(Button::Right);
        rig.press_n(Button::Right, 2);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::HasLd));

        rig.press(Button::Down);
        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::LdLevel));
        assert_eq!(rig.frame().prompt.unwrap(), ("LD active when:".into(), "LOW".into()));
        rig.press(Button::Up);
        assert_eq!(rig.frame().prompt.unwrap().1, "HIGH");
        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::HasStop));
    }

    #[test]
    fn test_wizard_number_bounds() {
        let mut rig = Rig::four();
        rig.menu_select("Add Motor");
        rig.press(Button::Down);
        rig.press(Button::Down);
        rig.press(Button::Right);
        rig.press_n(Button::Right, 5);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::Ppr));

        rig.press_n(Button::Down, 7);
        assert_eq!(rig.frame().prompt.unwrap().1, "1");
        rig.press(Button::Right);

        rig.press_n(Button::Down, 22);
        assert_eq!(rig.frame().prompt.unwrap().1, "1000");
    }

    #[test]
    fn test_wizard_left_discards_draft() {
        let mut rig = Rig::four();
        rig.menu_select("Add Motor");
        rig.press(Button::Up);
        rig.press(Button::Right);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Menu);
        assert_eq!(rig.profiles.count(), 0);

        // a fresh wizard starts from scratch
        rig.press(Button::Left);
        rig.menu_select("Add Motor");
        assert_eq!(rig.nav.editor.cursor(), 0);
        assert_eq!(rig.nav.editor.current(), None);
    }

    #[test]
    fn test_select_motor_activates_choice() {
        let mut rig = Rig::booted(
            DeviceConfig::default(),
            store_with(&[named("Alpha"), named("Beta")]),
        );
        assert_eq!(rig.motor.profile().name.as_str(), "Alpha");

        rig.menu_select("Select Motor");
        assert_eq!(rig.nav.screen(), Screen::SelectMotor);
        let frame = rig.frame();
        assert_eq!(frame.items, ["Alpha", "Beta"]);
        assert_eq!(frame.highlighted, 0);

        rig.press(Button::Down);
        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert_eq!(rig.profiles.active_index(), Some(1));
        assert_eq!(rig.motor.profile().name.as_str(), "Beta");
        assert_eq!(
            rig.profiles.kv_mut().get_u8(StorageKey::ActiveProfile),
            Ok(Some(1))
        );

        // list opens on the active entry, Left backs out to the menu
        rig.menu_select("Select Motor");
        assert_eq!(rig.frame().highlighted, 1);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Menu);
    }

    #[test]
    fn test_delete_active_falls_back_to_default() {
        let mut rig = Rig::booted(DeviceConfig::default(), store_with(&[named("Alpha")]));
        rig.menu_select("Delete Active");
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert_eq!(rig.profiles.count(), 0);
        assert_eq!(rig.motor.profile().name.as_str(), "Unnamed");

        rig.press(Button::Right);
        assert!(!rig.frame().items.iter().any(|i| i == "Delete Active"));
    }

    #[test]
    fn test_delete_active_loads_next() {
        let mut rig = Rig::booted(
            DeviceConfig::default(),
            store_with(&[named("Alpha"), named("Beta")]),
        );
        rig.menu_select("Delete Active");
        assert_eq!(rig.profiles.count(), 1);
        assert_eq!(rig.motor.profile().name.as_str(), "Beta");
    }

    #[test]
    fn test_language_selection_persists() {
        let mut rig = Rig::four();
        rig.menu_select("Language/Telemetry");
        assert_eq!(rig.nav.screen(), Screen::Settings);
        assert_eq!(rig.frame().items, ["Language", "Telemetry"]);

        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::SettingsLanguage);
        assert_eq!(rig.frame().highlighted, 0);
        rig.press(Button::Down);
        rig.press(Button::Right);

        assert_eq!(rig.nav.screen(), Screen::Home);
        assert_eq!(rig.settings.language, Language::Spanish);
        assert_eq!(
            rig.profiles.kv_mut().get_u8(StorageKey::Language),
            Ok(Some(1))
        );
        assert_eq!(rig.frame().status[0], "PARADO");
    }

    #[test]
    fn test_language_left_returns_to_settings() {
        let mut rig = Rig::four();
        rig.menu_select("Language/Telemetry");
        rig.press(Button::Right);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Settings);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Menu);
    }

    #[test]
    fn test_telemetry_toggle_stays_on_screen() {
        let mut rig = Rig::four();
        rig.menu_select("Language/Telemetry");
        rig.press(Button::Down);
        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::SettingsTelemetry);
        assert_eq!(rig.frame().items, ["Telemetry: OFF"]);

        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::SettingsTelemetry);
        assert!(rig.settings.telemetry);
        assert_eq!(rig.frame().items, ["Telemetry: ON"]);
        assert_eq!(
            rig.profiles.kv_mut().get_bool(StorageKey::Telemetry),
            Ok(Some(true))
        );

        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Settings);
    }

    #[test]
    fn test_about_exits_to_menu() {
        let mut rig = Rig::four();
        rig.menu_select("About");
        assert_eq!(rig.nav.screen(), Screen::About);
        let frame = rig.frame();
        assert!(frame.has_status("Version: v2.0"));
        rig.press(Button::Right);
        assert_eq!(rig.nav.screen(), Screen::Menu);

        rig.press(Button::Left);
        rig.menu_select("About");
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Menu);
    }

    #[test]
    fn test_autotest_runs_and_aborts() {
        let mut rig = Rig::four();
        rig.motor.step_speed_up();
        let saved = rig.motor.target_hz();

        rig.menu_select("Auto Test");
        assert_eq!(rig.nav.screen(), Screen::AutoTest);
        rig.idle(1000);
        assert!(rig.motor.is_running());
        assert_eq!(rig.motor.current_hz(), 6000);

        let frame = rig.frame();
        assert_eq!(frame.header, "AUTO TEST");
        assert_eq!(
            frame.status,
            ["Cycle: 1/3", "Phase: CW Test", "Speed: 6000 Hz"]
        );
        assert_eq!(frame.footer, "LEFT to cancel");

        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert!(!rig.motor.is_running());
        assert_eq!(rig.motor.target_hz(), saved);
    }

    #[test]
    fn test_autotest_completes() {
        let mut rig = Rig::four();
        rig.menu_select("Auto Test");
        rig.idle(60_000);
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert!(!rig.motor.is_running());
        assert_eq!(rig.motor.target_hz(), DEFAULT_TARGET_HZ);
    }

    #[test]
    fn test_autotest_alarm_stops() {
        let profile = MotorProfile {
            has_ld: true,
            ..named("Guarded")
        };
        let mut rig = Rig::booted(DeviceConfig::default(), store_with(&[profile]));
        rig.menu_select("Auto Test");
        rig.idle(500);
        assert!(rig.motor.is_running());

        rig.motor.port_mut().fault_high = false;
        rig.tick();
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert!(!rig.motor.is_running());
    }

    #[test]
    fn test_redraw_tracking() {
        let mut rig = Rig::four();
        rig.press(Button::Right);
        assert!(rig.nav.needs_redraw());
        rig.nav.mark_drawn();
        rig.idle(100);
        assert!(!rig.nav.needs_redraw());

        rig.press(Button::Down);
        assert!(rig.nav.needs_redraw());
        rig.nav.mark_drawn();

        // Home is live only while running
        rig.press(Button::Left);
        rig.nav.mark_drawn();
        rig.idle(20);
        assert!(!rig.nav.needs_redraw());
        rig.motor.start();
        rig.idle(20);
        rig.nav.mark_drawn();
        assert!(rig.nav.needs_redraw());
    }

    #[test]
    fn test_three_button_short_select_opens_menu() {
        let mut rig = Rig::three();
        assert_eq!(rig.frame().footer, "UD:Spd SEL:Menu HOLD:Run");

        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Menu);
        let frame = rig.frame();
        assert_eq!(frame.items.last().map(|s| s.as_str()), Some("Back"));
        assert_eq!(frame.footer, "UP/DN=Move SEL=Select");
        assert!(!rig.motor.is_running());
    }

    #[test]
    fn test_three_button_long_select_toggles_run() {
        let mut rig = Rig::three();
        rig.hold(Button::Left, 800);
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert!(rig.motor.is_running());

        rig.hold(Button::Left, 800);
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert!(!rig.motor.is_running());
    }

    #[test]
    fn test_three_button_back_items() {
        let mut rig = Rig::three();
        rig.press(Button::Left);
        let len = rig.frame().items.len();
        rig.press_n(Button::Down, len - 1);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Home);

        // Settings: Language, Telemetry, Back
        rig.press(Button::Left);
        let idx = rig
            .frame()
            .items
            .iter()
            .position(|i| i == "Language/Telemetry")
            .unwrap();
        rig.press_n(Button::Down, idx);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Settings);
        assert_eq!(rig.frame().items, ["Language", "Telemetry", "Back"]);
        rig.press_n(Button::Down, 2);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Menu);
    }

    #[test]
    fn test_three_button_wizard_and_diagnostics() {
        let mut rig = Rig::three();
        rig.press(Button::Left);
        let idx = rig
            .frame()
            .items
            .iter()
            .position(|i| i == "Add Motor")
            .unwrap();
        rig.press_n(Button::Down, idx);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::Name));
        assert_eq!(rig.frame().footer, "UP/DN=Char SEL=Next/END");

        rig.press(Button::Down);
        rig.press(Button::Down);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Wizard(WizardStep::HasBrake));
    }

    #[test]
    fn test_three_button_diagnostics_exit_on_long_select() {
        let mut rig = Rig::with(
            three_button(),
            MemoryStore::default(),
            &[Button::Up, Button::Down],
        );
        assert_eq!(rig.nav.screen(), Screen::Diagnostics);
        rig.raw.release(Button::Up);
        rig.raw.release(Button::Down);
        rig.idle(100);
        assert!(rig.frame().has_status("U:0 D:0 S:0"));

        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Diagnostics);
        rig.hold(Button::Left, 800);
        assert_eq!(rig.nav.screen(), Screen::Home);
    }

    #[test]
    fn test_three_button_autotest_abort_on_select() {
        let mut rig = Rig::three();
        rig.press(Button::Left);
        let idx = rig
            .frame()
            .items
            .iter()
            .position(|i| i == "Auto Test")
            .unwrap();
        rig.press_n(Button::Down, idx);
        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::AutoTest);
        rig.idle(500);
        assert!(rig.motor.is_running());

        rig.press(Button::Left);
        assert_eq!(rig.nav.screen(), Screen::Home);
        assert!(!rig.motor.is_running());
    }
}
