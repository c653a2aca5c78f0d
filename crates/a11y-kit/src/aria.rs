//! ARIA Support
//!
//! ARIA roles and live-region modes.

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,

    // Widget roles
    Alert,
    AlertDialog,
    Button,
    Checkbox,
    Dialog,
    Link,
    Log,
    Menu,
    MenuBar,
    MenuItem,
    Option,
    ProgressBar,
    Radio,
    RadioGroup,
    Slider,
    SpinButton,
    Status,
    Switch,
    Tab,
    TabList,
    TabPanel,
    TextBox,
    Timer,
    ToolTip,
    Tree,
    TreeItem,

    // Document structure
    Article,
    Cell,
    Heading,
    Img,
    List,
    ListItem,
    Presentation,
    Row,
    Table,
    Toolbar,
}

impl AriaRole {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "banner" => Self::Banner,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "form" => Self::Form,
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "search" => Self::Search,
            "alert" => Self::Alert,
            "alertdialog" => Self::AlertDialog,
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "dialog" => Self::Dialog,
            "link" => Self::Link,
            "log" => Self::Log,
            "menu" => Self::Menu,
            "menubar" => Self::MenuBar,
            "menuitem" => Self::MenuItem,
            "option" => Self::Option,
            "progressbar" => Self::ProgressBar,
            "radio" => Self::Radio,
            "radiogroup" => Self::RadioGroup,
            "slider" => Self::Slider,
            "spinbutton" => Self::SpinButton,
            "status" => Self::Status,
            "switch" => Self::Switch,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "tabpanel" => Self::TabPanel,
            "textbox" => Self::TextBox,
            "timer" => Self::Timer,
            "tooltip" => Self::ToolTip,
            "tree" => Self::Tree,
            "treeitem" => Self::TreeItem,
            "article" => Self::Article,
            "cell" => Self::Cell,
            "heading" => Self::Heading,
            "img" => Self::Img,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "row" => Self::Row,
            "table" => Self::Table,
            "toolbar" => Self::Toolbar,
            "none" | "presentation" => Self::Presentation,
            _ => return None,
        })
    }

    /// Attribute value for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Complementary => "complementary",
            Self::ContentInfo => "contentinfo",
            Self::Form => "form",
            Self::Main => "main",
            Self::Navigation => "navigation",
            Self::Region => "region",
            Self::Search => "search",
            Self::Alert => "alert",
            Self::AlertDialog => "alertdialog",
            Self::Button => "button",
            Self::Checkbox => "checkbox",
            Self::Dialog => "dialog",
            Self::Link => "link",
            Self::Log => "log",
            Self::Menu => "menu",
            Self::MenuBar => "menubar",
            Self::MenuItem => "menuitem",
            Self::Option => "option",
            Self::ProgressBar => "progressbar",
            Self::Radio => "radio",
            Self::RadioGroup => "radiogroup",
            Self::Slider => "slider",
            Self::SpinButton => "spinbutton",
            Self::Status => "status",
            Self::Switch => "switch",
            Self::Tab => "tab",
            Self::TabList => "tablist",
            Self::TabPanel => "tabpanel",
            Self::TextBox => "textbox",
            Self::Timer => "timer",
            Self::ToolTip => "tooltip",
            Self::Tree => "tree",
            Self::TreeItem => "treeitem",
            Self::Article => "article",
            Self::Cell => "cell",
            Self::Heading => "heading",
            Self::Img => "img",
            Self::List => "list",
            Self::ListItem => "listitem",
            Self::Presentation => "presentation",
            Self::Row => "row",
            Self::Table => "table",
            Self::Toolbar => "toolbar",
        }
    }

    /// Check if role is widget
    pub fn is_widget(&self) -> bool {
        matches!(self,
            Self::Button | Self::Checkbox | Self::Link | Self::Menu |
            Self::MenuItem | Self::Radio | Self::Slider | Self::SpinButton |
            Self::Switch | Self::Tab | Self::TextBox | Self::TreeItem
        )
    }

    /// Check if role is landmark
    pub fn is_landmark(&self) -> bool {
        matches!(self,
            Self::Banner | Self::Complementary | Self::ContentInfo |
            Self::Form | Self::Main | Self::Navigation | Self::Region | Self::Search
        )
    }
}

/// Live region mode (`aria-live`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveRegionMode {
    #[default]
    Off,
    Polite,
    Assertive,
}

impl LiveRegionMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Some(Self::Off),
            "polite" => Some(Self::Polite),
            "assertive" => Some(Self::Assertive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(AriaRole::parse("button"), Some(AriaRole::Button));
        assert_eq!(AriaRole::parse(" Navigation "), Some(AriaRole::Navigation));
        assert_eq!(AriaRole::parse("none"), Some(AriaRole::Presentation));
        assert_eq!(AriaRole::parse(""), None);
        assert!(AriaRole::Button.is_widget());
        assert!(AriaRole::Navigation.is_landmark());
    }

    #[test]
    fn test_role_as_str_parses_back() {
        for role in [AriaRole::Dialog, AriaRole::ContentInfo, AriaRole::TreeItem] {
            assert_eq!(AriaRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_live_mode() {
        assert_eq!(LiveRegionMode::parse("assertive"), Some(LiveRegionMode::Assertive));
        assert_eq!(LiveRegionMode::parse("rude"), None);
        assert_eq!(LiveRegionMode::Polite.as_str(), "polite");
    }
}
