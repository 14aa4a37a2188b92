use anyhow::Context;
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

use crate::APP_TITLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrayCommand {
    Open,
    Scan,
    Exit,
}

pub(crate) struct Tray {
    _icon: TrayIcon,
    open_id: MenuId,
    scan_id: MenuId,
    exit_id: MenuId,
}

impl Tray {
    /// Drains pending menu and icon events.
    pub(crate) fn poll(&self) -> Vec<TrayCommand> {
        let mut commands = Vec::new();

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if event.id == self.open_id {
                commands.push(TrayCommand::Open);
            } else if event.id == self.scan_id {
                commands.push(TrayCommand::Scan);
            } else if event.id == self.exit_id {
                commands.push(TrayCommand::Exit);
            }
        }

        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                commands.push(TrayCommand::Open);
            }
        }

        commands
    }
}

pub(crate) fn init_tray() -> anyhow::Result<Tray> {
    let icon = build_tray_icon()?;
    let menu = Menu::new();
    let open = MenuItem::new("Open", true, None);
    let scan = MenuItem::new("Scan Files", true, None);
    let exit = MenuItem::new("Exit", true, None);

    menu.append(&open).context("adding Open menu item")?;
    menu.append(&scan).context("adding Scan Files menu item")?;
    menu.append(&PredefinedMenuItem::separator())
        .context("adding menu separator")?;
    menu.append(&exit).context("adding Exit menu item")?;

    let icon = TrayIconBuilder::new()
        .with_tooltip(APP_TITLE)
        .with_icon(icon)
        .with_menu(Box::new(menu))
        .build()
        .context("building tray icon")?;

    Ok(Tray {
        _icon: icon,
        open_id: open.id().clone(),
        scan_id: scan.id().clone(),
        exit_id: exit.id().clone(),
    })
}

// A page with a folded corner and three text lines.
fn build_tray_icon() -> anyhow::Result<Icon> {
    let width = 16u32;
    let height = 16u32;
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height {
        for x in 0..width {
            let inside_page = (3..=12).contains(&x) && (1..=14).contains(&y);
            let folded_corner = x >= 10 && y <= 3 && (x - 10) + (3 - y) > 2;
            let border = x == 3 || x == 12 || y == 1 || y == 14;
            let text_line = (5..=10).contains(&x) && matches!(y, 5 | 8 | 11);

            let (r, g, b, a) = if !inside_page || folded_corner {
                (0, 0, 0, 0)
            } else if border {
                (26, 35, 46, 255)
            } else if text_line {
                (125, 207, 255, 255)
            } else {
                (240, 242, 245, 255)
            };

            rgba.extend_from_slice(&[r, g, b, a]);
        }
    }

    Icon::from_rgba(rgba, width, height).context("building tray icon image")
}
