//! # packboard-dashboard
//!
//! Terminal dashboard for build telemetry: the consumer half of
//! packboard.
//!
//! Incoming frames are folded into a [`DashboardState`] by a pure
//! reducer; rendering reads that state and never mutates it. One frame
//! means one repaint, however many messages it carried.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────┬───────────────────────┐
//! │  PACKBOARD                         │  [q]uit [↑/↓] bundle  │
//! ├────────────────────────────────────┼───────────────────────┤
//! │  LOG                               │  STATUS   Success     │
//! │  Compiled successfully!            │  OPERATION idle (3s)  │
//! │  main.js  1.46 KB                  │  PROGRESS  [### 100%] │
//! ├──────────────┬─────────────────────┴──┬────────────────────┤
//! │  MODULES     │  PROBLEMS              │  ASSETS            │
//! │  ~/lodash    │  No problems detected! │  main.js  1.46 KB  │
//! │  ./src/app.js│                        │  Total    1.46 KB  │
//! └──────────────┴────────────────────────┴────────────────────┘
//! ```

mod state;

pub use state::{DashboardState, PanelState};

mod reducer;

pub use reducer::{apply_batch, apply_message};

mod server;
mod widgets;

pub use server::{bind, serve, IncomingBatch};
pub use widgets::{
    accent_color, AssetsWidget, LogWidget, ModulesWidget, OperationWidget, ProblemsWidget,
    ProgressWidget, StatusWidget,
};

mod app;
mod event;
mod run;
mod terminal;
mod ui;

pub use app::App;
pub use run::run;
