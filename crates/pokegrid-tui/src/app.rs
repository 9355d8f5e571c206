//! Application state management for pokegrid.
//!
//! This module contains the `App` struct holding UI state, the pokemon
//! queries, and the channel that background fetch tasks report through.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use pokegrid_core::models::{cards, Card, Identifier, Pokemon};
use pokegrid_core::{Config, PokeApiClient, PokemonQueries};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 16;

/// Cards per row in the gallery grid.
pub const GRID_COLUMNS: usize = 4;

/// Maximum length for the lookup prompt.
/// The longest pokemon names are well under this.
const MAX_LOOKUP_LENGTH: usize = 32;

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Cards,
    Pokemon,
}

impl Tab {
    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Cards => Tab::Pokemon,
            Tab::Pokemon => Tab::Cards,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        // Two tabs: same as next
        self.next()
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    LookingUp,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Movement inside the card grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMove {
    Up,
    Down,
    Left,
    Right,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from spawned fetch tasks back to the UI loop.
/// Errors are carried as display strings.
#[derive(Debug)]
enum RefreshResult {
    PokemonList(Result<Vec<Pokemon>, String>),
    Lookup(Identifier, Result<Option<Pokemon>, String>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub queries: PokemonQueries,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub card_selection: usize,
    pub pokemon_selection: usize,

    // Lookup prompt
    pub lookup_input: String,
    pub lookup_result: Option<Pokemon>,
    pub lookup_error: Option<String>,
    pending_lookup: Option<Identifier>,

    // Data
    pub cards: &'static [Card],
    pub pokemon: Vec<Pokemon>,
    pub list_loading: bool,
    pub lookup_loading: bool,

    // Background task channel
    refresh_rx: mpsc::Receiver<RefreshResult>,
    refresh_tx: mpsc::Sender<RefreshResult>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let api = PokeApiClient::with_config(config)?;
        debug!(base_url = api.base_url(), "API client configured");
        Ok(Self::with_queries(PokemonQueries::new(api)))
    }

    pub fn with_queries(queries: PokemonQueries) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            queries,
            state: AppState::Normal,
            current_tab: Tab::Cards,
            card_selection: 0,
            pokemon_selection: 0,
            lookup_input: String::new(),
            lookup_result: None,
            lookup_error: None,
            pending_lookup: None,
            cards: cards(),
            pokemon: Vec::new(),
            list_loading: false,
            lookup_loading: false,
            refresh_rx: rx,
            refresh_tx: tx,
            status_message: None,
        }
    }

    // =========================================================================
    // Background fetching
    // =========================================================================

    /// Spawn a background task loading the pokemon list.
    /// With `force`, the cached list is treated as stale first.
    pub fn load_pokemon_background(&mut self, force: bool) {
        if self.list_loading {
            debug!("Pokemon list already loading");
            return;
        }
        info!(force, "Loading pokemon list");

        let queries = self.queries.clone();
        let tx = self.refresh_tx.clone();
        tokio::spawn(async move {
            let result = if force {
                queries.refresh_list().await
            } else {
                queries.list().await
            };
            Self::send_result(&tx, RefreshResult::PokemonList(result.map_err(|e| e.to_string())))
                .await;
        });

        self.list_loading = true;
        self.status_message = Some("Loading pokemon...".to_string());
    }

    /// Look up the pokemon typed into the prompt
    pub fn submit_lookup(&mut self) {
        let identifier = Identifier::parse(&self.lookup_input);
        self.state = AppState::Normal;

        if identifier.is_absent() {
            // Also abandons a lookup still in flight
            if self.pending_lookup.take().is_some() {
                self.status_message = None;
            }
            self.lookup_loading = false;
            self.lookup_result = None;
            self.lookup_error = None;
            return;
        }

        let queries = self.queries.clone();
        let tx = self.refresh_tx.clone();
        let requested = identifier.clone();
        tokio::spawn(async move {
            let result = queries.single(Some(&requested)).await;
            Self::send_result(
                &tx,
                RefreshResult::Lookup(requested, result.map_err(|e| e.to_string())),
            )
            .await;
        });

        self.lookup_loading = true;
        self.status_message = Some(format!("Looking up {}...", identifier));
        self.pending_lookup = Some(identifier);
    }

    async fn send_result(tx: &mpsc::Sender<RefreshResult>, result: RefreshResult) {
        if let Err(e) = tx.send(result).await {
            warn!(error = %e, "Failed to send fetch result - channel closed");
        }
    }

    /// Drain finished background tasks into app state
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.refresh_rx.try_recv() {
            self.process_refresh_result(result);
        }
    }

    fn process_refresh_result(&mut self, result: RefreshResult) {
        match result {
            RefreshResult::PokemonList(Ok(list)) => {
                info!(count = list.len(), "Pokemon list loaded");
                self.pokemon = list;
                self.pokemon_selection = self
                    .pokemon_selection
                    .min(self.pokemon.len().saturating_sub(1));
                self.list_loading = false;
                self.status_message = None;
            }
            RefreshResult::PokemonList(Err(e)) => {
                warn!(error = %e, "Failed to load pokemon list");
                self.list_loading = false;
                // Keep showing whatever the cache still holds
                if self.pokemon.is_empty() {
                    if let Some(cached) = self.queries.cached_list() {
                        self.pokemon = cached;
                    }
                }
                self.status_message = Some(e);
            }
            RefreshResult::Lookup(identifier, result) => {
                if self.pending_lookup.as_ref() != Some(&identifier) {
                    debug!(identifier = %identifier, "Dropping result of a superseded lookup");
                    return;
                }
                self.pending_lookup = None;
                self.lookup_loading = false;
                self.status_message = None;

                match result {
                    Ok(found) => {
                        debug!(identifier = %identifier, found = found.is_some(), "Lookup finished");
                        self.lookup_result = found;
                        self.lookup_error = None;
                    }
                    Err(e) => {
                        warn!(identifier = %identifier, error = %e, "Lookup failed");
                        self.lookup_result = None;
                        self.lookup_error = Some(format!("{}: {}", identifier, e));
                    }
                }
            }
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.card_selection)
    }

    pub fn selected_pokemon(&self) -> Option<&Pokemon> {
        self.pokemon.get(self.pokemon_selection)
    }

    pub fn move_card_selection(&mut self, direction: GridMove) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        let current = self.card_selection;
        self.card_selection = match direction {
            GridMove::Left => current.saturating_sub(1),
            GridMove::Right => (current + 1).min(len - 1),
            GridMove::Up => current.checked_sub(GRID_COLUMNS).unwrap_or(current),
            GridMove::Down => {
                let next = current + GRID_COLUMNS;
                if next < len {
                    next
                } else {
                    current
                }
            }
        };
    }

    pub fn select_next_pokemon(&mut self) {
        if self.pokemon_selection + 1 < self.pokemon.len() {
            self.pokemon_selection += 1;
        }
    }

    pub fn select_prev_pokemon(&mut self) {
        self.pokemon_selection = self.pokemon_selection.saturating_sub(1);
    }

    // =========================================================================
    // Lookup prompt
    // =========================================================================

    pub fn start_lookup(&mut self) {
        self.lookup_input.clear();
        self.state = AppState::LookingUp;
    }

    pub fn push_lookup_char(&mut self, c: char) {
        if self.lookup_input.chars().count() < MAX_LOOKUP_LENGTH && !c.is_control() {
            self.lookup_input.push(c);
        }
    }

    /// "Updated ..." text for the status bar
    pub fn list_age(&self) -> String {
        self.queries
            .list_state()
            .map(|state| state.age_display())
            .unwrap_or_else(|| "never".to_string())
    }
}
