use command_bus::{BusError, Command, CommandBus, CommandChannel};
use oopuo_tui::core::style::{bold, fg};
use oopuo_tui::{Key, SelectItem, SelectList, SelectListTheme, Theme};
use tracing::{debug, info, warn};

use crate::menu::{MenuEntry, MENU};
use crate::render;

/// Where the navigator publishes commands.
pub trait CommandSender {
    fn send(&self, command: Command) -> Result<(), BusError>;
}

impl<C: CommandChannel> CommandSender for CommandBus<C> {
    fn send(&self, command: Command) -> Result<(), BusError> {
        CommandBus::send(self, command)
    }
}

/// Sidebar menu state: selection, tunnel indicator and the running flag.
pub struct Navigator<S> {
    sender: S,
    list: SelectList,
    theme: Theme,
    tunnel_active: bool,
    running: bool,
}

impl<S: CommandSender> Navigator<S> {
    pub fn new(sender: S, theme: Theme, tunnel_active: bool) -> Self {
        let items = MENU
            .iter()
            .map(|entry| {
                if entry.is_muted() {
                    SelectItem::muted(entry.label)
                } else {
                    SelectItem::new(entry.label)
                }
            })
            .collect();
        Self {
            sender,
            list: SelectList::new(items, list_theme(theme)),
            theme,
            tunnel_active,
            running: true,
        }
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn selected_index(&self) -> usize {
        self.list.selected_index()
    }

    pub fn selected_entry(&self) -> MenuEntry {
        MENU[self.list.selected_index().min(MENU.len() - 1)]
    }

    /// Apply one key. Returns `false` for keys the menu ignores.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Up | Key::Char('k') => {
                self.list.select_previous();
                true
            }
            Key::Down | Key::Char('j') => {
                self.list.select_next();
                true
            }
            Key::Enter => {
                self.execute_selected();
                true
            }
            Key::CtrlC => {
                info!(target: "navigator", "interrupted from keyboard");
                self.running = false;
                true
            }
            _ => false,
        }
    }

    /// Publish the highlighted entry's command. `EXIT` also stops the navigator.
    pub fn execute_selected(&mut self) {
        let entry = self.selected_entry();
        match self.sender.send(entry.command) {
            Ok(()) => debug!(target: "navigator", command = %entry.command, "command published"),
            Err(err) => warn!(
                target: "navigator",
                command = %entry.command,
                error = %err,
                "failed to publish command"
            ),
        }
        if entry.command == Command::Exit {
            self.running = false;
        }
    }

    /// Frame lines for a `width` x `height` terminal.
    pub fn render(&mut self, width: usize, height: usize) -> Vec<String> {
        render::frame_lines(&mut self.list, &self.theme, self.tunnel_active, width, height)
    }
}

fn list_theme(theme: Theme) -> SelectListTheme {
    SelectListTheme {
        selected_text: Box::new(move |text| bold(&fg(text, theme.accent))),
        text: Box::new(move |text| fg(text, theme.primary)),
        muted_text: Box::new(move |text| fg(text, theme.muted)),
    }
}
