use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::logger::ChannelData;
use crate::{
    current_quote, Category, CurrentQuote, Delivery, Favorite, Favorites, FontColor, Preferences,
    QuoteFetcher, QuoteSource, Store,
};

/// How long the "Added Quote to Favorites" bubble stays up.
pub(crate) const INFO_BUBBLE_DURATION: Duration = Duration::from_secs(2);

/// Step applied by the font color adjusters.
pub(crate) const COLOR_STEP: f64 = 0.05;

/// Represents the current screen being displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AppScreen {
    /// Current quote with share/favorite/refresh actions.
    Home,
    /// Category picker and display toggles.
    Settings,
    /// Notification toggle, reached from settings.
    Notifications,
    /// Saved quotes.
    Favorites,
}

impl AppScreen {
    /// Top-level tabs, in display order.
    pub(crate) const TABS: [AppScreen; 3] =
        [AppScreen::Home, AppScreen::Settings, AppScreen::Favorites];

    pub(crate) fn title(self) -> &'static str {
        match self {
            AppScreen::Home => "Home",
            AppScreen::Settings | AppScreen::Notifications => "Settings",
            AppScreen::Favorites => "Favorites",
        }
    }

    /// Index of the tab this screen belongs to.
    pub(crate) fn tab_index(self) -> usize {
        match self {
            AppScreen::Home => 0,
            AppScreen::Settings | AppScreen::Notifications => 1,
            AppScreen::Favorites => 2,
        }
    }
}

/// Rows of the settings form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SettingsItem {
    QuoteType,
    LargerFont,
    CustomFontColor,
    Red,
    Green,
    Blue,
    Notifications,
}

impl SettingsItem {
    pub(crate) const ALL: [SettingsItem; 7] = [
        SettingsItem::QuoteType,
        SettingsItem::LargerFont,
        SettingsItem::CustomFontColor,
        SettingsItem::Red,
        SettingsItem::Green,
        SettingsItem::Blue,
        SettingsItem::Notifications,
    ];
}

/// Main application state.
pub struct AppState<S> {
    /// Current screen being displayed.
    pub(crate) screen: AppScreen,
    /// Persistent key-value store, owned by the UI thread.
    pub(crate) store: Store,
    /// Preference snapshot, written through to `store`.
    pub(crate) prefs: Preferences,
    /// Quote shown on the home screen.
    pub(crate) current: CurrentQuote,
    /// Background quote requests.
    pub(crate) fetcher: QuoteFetcher<S>,
    /// Favorites as of the last time the favorites screen was opened.
    pub(crate) favorites: Vec<Favorite>,
    /// Selected row in the favorites list.
    pub(crate) selected_favorite: usize,
    /// Selected row in the settings form.
    pub(crate) settings_selection: usize,
    /// Whether the category picker list is expanded.
    pub(crate) picker_open: bool,
    /// Highlighted row in the category picker.
    pub(crate) picker_selection: usize,
    /// Until when the "added to favorites" bubble is shown.
    pub(crate) info_bubble_until: Option<Instant>,
    /// Text offered for sharing, shown in a popup.
    pub(crate) share_text: Option<String>,
    /// Most recent log message for the status bar.
    pub(crate) status: Option<ChannelData>,
    /// Log records forwarded by the channel logger.
    pub(crate) log_rx: Option<Receiver<ChannelData>>,
    /// Should the application quit?
    pub should_quit: bool,
}

impl<S> AppState<S> {
    /// Pull pending log records; the newest one wins the status bar.
    pub(crate) fn drain_log(&mut self) {
        if let Some(rx) = &self.log_rx {
            while let Ok(record) = rx.try_recv() {
                self.status = Some(record);
            }
        }
    }

    pub(crate) fn info_bubble_visible(&self, now: Instant) -> bool {
        self.info_bubble_until.is_some_and(|until| now < until)
    }

    pub(crate) fn expire_info_bubble(&mut self, now: Instant) {
        if !self.info_bubble_visible(now) {
            self.info_bubble_until = None;
        }
    }

    pub(crate) fn selected_setting(&self) -> SettingsItem {
        SettingsItem::ALL[self.settings_selection.min(SettingsItem::ALL.len() - 1)]
    }
}

impl<S> AppState<S>
where
    S: QuoteSource + Send + Sync + 'static,
{
    /// Create the state from an opened store and start the first fetch.
    pub fn new(store: Store, source: S) -> Self {
        let prefs = Preferences::load(&store);
        let current = current_quote(&store);
        let mut state = Self {
            screen: AppScreen::Home,
            store,
            prefs,
            current,
            fetcher: QuoteFetcher::new(source),
            favorites: Vec::new(),
            selected_favorite: 0,
            settings_selection: 0,
            picker_open: false,
            picker_selection: 0,
            info_bubble_until: None,
            share_text: None,
            status: None,
            log_rx: None,
            should_quit: false,
        };
        state.request_quote();
        state
    }

    /// Route log records from `rx` into the status bar.
    pub fn with_log_receiver(mut self, rx: Receiver<ChannelData>) -> Self {
        self.log_rx = Some(rx);
        self
    }

    /// Ask for a new quote in the selected category.
    pub(crate) fn request_quote(&mut self) {
        let tag = self.prefs.tag();
        if tag.is_empty() {
            warn!(
                "quote type {} has no category; requesting without a tag filter",
                self.prefs.quote_type
            );
        }
        self.fetcher.request(tag);
    }

    /// Apply finished requests. Returns true when the displayed quote changed.
    pub(crate) fn apply_fetch_results(&mut self) -> bool {
        let mut changed = false;
        for delivery in self.fetcher.poll(&mut self.store) {
            if let Delivery::Updated(current) = delivery {
                self.current = current;
                changed = true;
            }
        }
        changed
    }

    pub(crate) fn switch_to(&mut self, screen: AppScreen) {
        if screen == AppScreen::Favorites {
            self.reload_favorites();
        }
        self.picker_open = false;
        self.share_text = None;
        self.screen = screen;
    }

    pub(crate) fn reload_favorites(&mut self) {
        self.favorites = Favorites::new(&mut self.store).pairs();
        if self.selected_favorite >= self.favorites.len() {
            self.selected_favorite = self.favorites.len().saturating_sub(1);
        }
    }

    /// Save the displayed quote as a favorite and raise the info bubble.
    pub(crate) fn favorite_current(&mut self, now: Instant) {
        if self.current.is_empty() {
            return;
        }
        let (text, author) = (self.current.quote.clone(), self.current.author.clone());
        match Favorites::new(&mut self.store).append(&text, &author) {
            Ok(()) => self.info_bubble_until = Some(now + INFO_BUBBLE_DURATION),
            Err(e) => warn!("Could not save favorite: {e}"),
        }
    }

    pub(crate) fn delete_selected_favorite(&mut self) {
        match Favorites::new(&mut self.store).delete_at(self.selected_favorite) {
            Ok(_) => self.reload_favorites(),
            Err(e) => warn!("Could not delete favorite: {e}"),
        }
    }

    pub(crate) fn share_current(&mut self) {
        if !self.current.is_empty() {
            self.offer_share(self.current.share_text());
        }
    }

    pub(crate) fn share_selected_favorite(&mut self) {
        if let Some(fav) = self.favorites.get(self.selected_favorite) {
            self.offer_share(fav.share_text());
        }
    }

    fn offer_share(&mut self, text: String) {
        info!("Share: {text}");
        self.share_text = Some(text);
    }

    // ---- settings ----------------------------------------------------------

    pub(crate) fn open_picker(&mut self) {
        self.picker_selection = self
            .prefs
            .category()
            .map(|c| c.preference() as usize - 1)
            .unwrap_or(0);
        self.picker_open = true;
    }

    pub(crate) fn pick_category(&mut self, category: Category) {
        if let Err(e) = self.prefs.set_category(&mut self.store, category) {
            warn!("Could not save quote type: {e}");
        }
    }

    /// Move the selected category by `delta`, wrapping around.
    pub(crate) fn cycle_category(&mut self, delta: i64) {
        let count = Category::ALL.len() as i64;
        let current = self.prefs.category().map(Category::preference).unwrap_or(1) - 1;
        let next = (current + delta).rem_euclid(count);
        self.pick_category(Category::ALL[next as usize]);
    }

    pub(crate) fn toggle_larger_font(&mut self) {
        let value = !self.prefs.larger_font;
        if let Err(e) = self.prefs.set_larger_font(&mut self.store, value) {
            warn!("Could not save font size: {e}");
        }
    }

    pub(crate) fn toggle_custom_font_color(&mut self) {
        let value = !self.prefs.custom_font_color;
        if let Err(e) = self.prefs.set_custom_font_color(&mut self.store, value) {
            warn!("Could not save font color toggle: {e}");
        }
    }

    pub(crate) fn toggle_notifs(&mut self) {
        let value = !self.prefs.notifs;
        if let Err(e) = self.prefs.set_notifs(&mut self.store, value) {
            warn!("Could not save notifications toggle: {e}");
        }
    }

    /// Nudge one color channel; `item` must be Red, Green or Blue.
    pub(crate) fn adjust_color(&mut self, item: SettingsItem, delta: f64) {
        let FontColor { mut r, mut g, mut b } = self.prefs.font_color;
        match item {
            SettingsItem::Red => r += delta,
            SettingsItem::Green => g += delta,
            SettingsItem::Blue => b += delta,
            _ => return,
        }
        if let Err(e) = self
            .prefs
            .set_font_color(&mut self.store, FontColor::new(r, g, b))
        {
            warn!("Could not save font color: {e}");
        }
    }
}
