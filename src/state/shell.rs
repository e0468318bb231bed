use crate::models::ConnectivityStatus;
use chrono::{DateTime, Local};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Create,
    Gallery,
}

#[derive(Debug)]
pub enum ShellEvent {
    CheckConnection,
    HealthChecked { reachable: bool, at: DateTime<Local> },
    SelectTab(Tab),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    HealthCheck,
    /// Mount a fresh instance of the tab's view.
    Mount(Tab),
}

#[derive(Clone, Debug)]
pub struct ShellState {
    pub tab: Tab,
    pub connectivity: ConnectivityStatus,
    pub last_checked: Option<DateTime<Local>>,
    in_flight: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            connectivity: ConnectivityStatus::Checking,
            last_checked: None,
            in_flight: false,
        }
    }
}

impl ShellState {
    pub fn show_offline_banner(&self) -> bool {
        self.connectivity == ConnectivityStatus::Disconnected
    }

    pub fn update(&mut self, event: ShellEvent) -> Option<ShellCommand> {
        match event {
            ShellEvent::CheckConnection => {
                if self.in_flight {
                    return None;
                }
                self.in_flight = true;
                self.connectivity = ConnectivityStatus::Checking;
                Some(ShellCommand::HealthCheck)
            }
            ShellEvent::HealthChecked { reachable, at } => {
                self.in_flight = false;
                self.connectivity = if reachable {
                    ConnectivityStatus::Connected
                } else {
                    ConnectivityStatus::Disconnected
                };
                self.last_checked = Some(at);
                None
            }
            ShellEvent::SelectTab(tab) => {
                if tab == self.tab {
                    return None;
                }
                self.tab = tab;
                Some(ShellCommand::Mount(tab))
            }
        }
    }
}
