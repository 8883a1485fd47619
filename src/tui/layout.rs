//! Frame regions for the signed-in console: header row, tab sidebar, content
//! (with the load-failure banner on top when raised) and the status row.

use ratatui::layout::{Constraint, Layout, Rect};

/// Expanded sidebar: group headers plus tab labels such as "Access Control".
pub const SIDEBAR_EXPANDED_WIDTH: u16 = 22;
/// Collapsed sidebar: one icon per tab.
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 3;
/// Below this width the sidebar collapses on its own.
pub const AUTO_COLLAPSE_THRESHOLD: u16 = 70;
/// Below this width the sidebar is not drawn at all.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarVisibility {
    Expanded,
    Collapsed,
    Hidden,
}

impl SidebarVisibility {
    fn for_width(width: u16, user_collapsed: bool) -> Self {
        if width < HIDE_SIDEBAR_THRESHOLD {
            Self::Hidden
        } else if user_collapsed || width < AUTO_COLLAPSE_THRESHOLD {
            Self::Collapsed
        } else {
            Self::Expanded
        }
    }

    fn width(self) -> Option<u16> {
        match self {
            Self::Hidden => None,
            Self::Collapsed => Some(SIDEBAR_COLLAPSED_WIDTH),
            Self::Expanded => Some(SIDEBAR_EXPANDED_WIDTH),
        }
    }
}

/// Regions of one console frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Brand, active tab and acting identity.
    pub header: Rect,
    pub sidebar: Option<Rect>,
    /// Load-failure banner, only when the last batch load failed.
    pub banner: Option<Rect>,
    /// Active tab's view.
    pub main: Rect,
    /// Key hints and load state.
    pub status: Rect,
}

impl AppLayout {
    /// `user_collapsed` is the Ctrl+B toggle; `show_banner` reserves a row
    /// above the view for the load-failure message.
    pub fn compute(area: Rect, user_collapsed: bool, show_banner: bool) -> (Self, SidebarVisibility) {
        let visibility = SidebarVisibility::for_width(area.width, user_collapsed);

        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let (sidebar, content) = match visibility.width() {
            None => (None, body),
            Some(width) => {
                let [side, rest] =
                    Layout::horizontal([Constraint::Length(width), Constraint::Min(1)]).areas(body);
                (Some(side), rest)
            }
        };

        let (banner, main) = if show_banner {
            let [banner, main] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(content);
            (Some(banner), main)
        } else {
            (None, content)
        };

        (
            AppLayout {
                header,
                sidebar,
                banner,
                main,
                status,
            },
            visibility,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_status_frame_the_body() {
        let area = Rect::new(0, 0, 120, 40);
        let (layout, _) = AppLayout::compute(area, false, false);
        assert_eq!(layout.header, Rect::new(0, 0, 120, 1));
        assert_eq!(layout.status, Rect::new(0, 39, 120, 1));
        let sidebar = layout.sidebar.expect("sidebar on a wide terminal");
        assert_eq!(sidebar.y, 1);
        assert_eq!(sidebar.height, 38);
        assert_eq!(layout.main, Rect::new(SIDEBAR_EXPANDED_WIDTH, 1, 98, 38));
    }

    #[test]
    fn test_banner_takes_the_top_row_of_the_view() {
        let area = Rect::new(0, 0, 120, 40);
        let (plain, _) = AppLayout::compute(area, false, false);
        let (layout, _) = AppLayout::compute(area, false, true);
        let banner = layout.banner.expect("banner row");
        assert_eq!(banner, Rect::new(plain.main.x, 1, plain.main.width, 1));
        assert_eq!(layout.main.y, 2);
        assert_eq!(layout.main.height, plain.main.height - 1);
        // The sidebar keeps its full height.
        assert_eq!(layout.sidebar, plain.sidebar);
        assert!(plain.banner.is_none());
    }

    #[test]
    fn test_ctrl_b_collapses_to_icons() {
        let area = Rect::new(0, 0, 120, 40);
        let (layout, vis) = AppLayout::compute(area, true, false);
        assert_eq!(vis, SidebarVisibility::Collapsed);
        assert_eq!(layout.sidebar.map(|s| s.width), Some(SIDEBAR_COLLAPSED_WIDTH));
        assert_eq!(layout.main.width, 120 - SIDEBAR_COLLAPSED_WIDTH);
    }

    #[test]
    fn test_narrow_terminal_drops_sidebar_but_keeps_rows() {
        let area = Rect::new(0, 0, 20, 12);
        let (layout, vis) = AppLayout::compute(area, false, true);
        assert_eq!(vis, SidebarVisibility::Hidden);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.banner, Some(Rect::new(0, 1, 20, 1)));
        assert_eq!(layout.main, Rect::new(0, 2, 20, 9));
        assert_eq!(layout.status.y, 11);
    }

    #[test]
    fn test_visibility_thresholds() {
        assert_eq!(
            SidebarVisibility::for_width(AUTO_COLLAPSE_THRESHOLD, false),
            SidebarVisibility::Expanded
        );
        assert_eq!(
            SidebarVisibility::for_width(AUTO_COLLAPSE_THRESHOLD - 1, false),
            SidebarVisibility::Collapsed
        );
        assert_eq!(
            SidebarVisibility::for_width(HIDE_SIDEBAR_THRESHOLD - 1, true),
            SidebarVisibility::Hidden
        );
    }
}
