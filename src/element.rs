use ratatui::style::Style;
use ratatui::text::Line;

/// Stable identifier for focusable UI elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusId(pub String);

impl FocusId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for FocusId {
    fn from(s: &str) -> Self {
        FocusId(s.to_string())
    }
}

impl From<String> for FocusId {
    fn from(s: String) -> Self {
        FocusId(s)
    }
}

/// Alignment options for positioned layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// A layer in a stack of UI elements
#[derive(Clone)]
pub struct Layer<Msg> {
    pub element: Element<Msg>,
    pub alignment: Alignment,
    pub dim_below: bool,
}

impl<Msg> Layer<Msg> {
    pub fn new(element: Element<Msg>) -> Self {
        Self {
            element,
            alignment: Alignment::TopLeft,
            dim_below: false,
        }
    }

    pub fn center(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn dim(mut self, should_dim: bool) -> Self {
        self.dim_below = should_dim;
        self
    }
}

/// Layout constraints for sizing elements within containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutConstraint {
    /// Fixed size (exact number of lines/columns)
    Length(u16),
    /// Minimum size (at least this many lines/columns)
    Min(u16),
    /// Proportional fill (weight for distributing remaining space)
    Fill(u16),
}

/// Declarative UI elements that compose to form a modal directive.
///
/// This is the vocabulary modal presentation needs, nothing more: text,
/// buttons, linear layouts, a bordered panel, and layered stacks for the
/// overlay itself. Hosts with richer element trees can translate these
/// one-to-one.
#[derive(Clone)]
pub enum Element<Msg> {
    /// Empty element that renders nothing
    None,

    /// Static text
    Text { content: String, style: Option<Style> },

    /// Styled text with multiple spans
    StyledText { line: Line<'static> },

    /// Interactive button
    Button {
        id: FocusId,
        label: String,
        on_press: Option<Msg>,
        style: Option<Style>,
        focused: bool,
    },

    /// Vertical layout container
    Column {
        items: Vec<(LayoutConstraint, Element<Msg>)>,
        spacing: u16,
    },

    /// Horizontal layout container
    Row {
        items: Vec<(LayoutConstraint, Element<Msg>)>,
        spacing: u16,
    },

    /// Panel with border
    Panel {
        child: Box<Element<Msg>>,
        title: Option<String>,
        width: Option<u16>,
        height: Option<u16>,
    },

    /// Stack of layered elements (for modals, overlays)
    Stack { layers: Vec<Layer<Msg>> },
}

impl<Msg> Element<Msg> {
    /// Create a text element
    pub fn text(content: impl Into<String>) -> Self {
        Element::Text {
            content: content.into(),
            style: None,
        }
    }

    /// Create a styled text element
    pub fn styled_text(line: Line<'static>) -> Self {
        Element::StyledText { line }
    }

    /// Create a button element
    pub fn button(id: impl Into<FocusId>, label: impl Into<String>) -> ButtonBuilder<Msg> {
        ButtonBuilder {
            id: id.into(),
            label: label.into(),
            on_press: None,
            style: None,
            focused: false,
        }
    }

    /// Create a column layout
    pub fn column(children: Vec<Element<Msg>>) -> ColumnBuilder<Msg> {
        let items = children
            .into_iter()
            .map(|child| (child.default_constraint(), child))
            .collect();
        ColumnBuilder { items, spacing: 1 }
    }

    /// Create a row layout
    pub fn row(children: Vec<Element<Msg>>) -> RowBuilder<Msg> {
        let items = children
            .into_iter()
            .map(|child| (child.default_constraint(), child))
            .collect();
        RowBuilder { items, spacing: 1 }
    }

    /// Wrap element in a panel with border
    pub fn panel(child: Element<Msg>) -> PanelBuilder<Msg> {
        PanelBuilder {
            child: Box::new(child),
            title: None,
            width: None,
            height: None,
        }
    }

    /// Create a stack of layers
    pub fn stack(layers: Vec<Layer<Msg>>) -> Self {
        Element::Stack { layers }
    }

    /// Get the default layout constraint for this element type
    pub fn default_constraint(&self) -> LayoutConstraint {
        match self {
            Element::None => LayoutConstraint::Length(0),
            Element::Text { .. } => LayoutConstraint::Length(1),
            Element::StyledText { .. } => LayoutConstraint::Length(1),
            Element::Button { .. } => LayoutConstraint::Length(1),
            Element::Column { .. } => LayoutConstraint::Fill(1),
            Element::Row { .. } => LayoutConstraint::Fill(1),
            Element::Panel { child, height, .. } => {
                if let Some(h) = height {
                    LayoutConstraint::Length(*h)
                } else {
                    // Panel sizes to child + 2 lines for borders
                    match child.default_constraint() {
                        LayoutConstraint::Length(n) => LayoutConstraint::Length(n + 2),
                        LayoutConstraint::Min(n) => LayoutConstraint::Min(n + 2),
                        LayoutConstraint::Fill(w) => LayoutConstraint::Fill(w),
                    }
                }
            }
            Element::Stack { .. } => LayoutConstraint::Fill(1),
        }
    }
}

impl<Msg> Default for Element<Msg> {
    fn default() -> Self {
        Element::None
    }
}

/// Builder for button elements
pub struct ButtonBuilder<Msg> {
    pub(crate) id: FocusId,
    pub(crate) label: String,
    pub(crate) on_press: Option<Msg>,
    pub(crate) style: Option<Style>,
    pub(crate) focused: bool,
}

impl<Msg> ButtonBuilder<Msg> {
    pub fn on_press(mut self, msg: Msg) -> Self {
        self.on_press = Some(msg);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Button {
            id: self.id,
            label: self.label,
            on_press: self.on_press,
            style: self.style,
            focused: self.focused,
        }
    }
}

/// Builder for column layouts
pub struct ColumnBuilder<Msg> {
    pub(crate) items: Vec<(LayoutConstraint, Element<Msg>)>,
    pub(crate) spacing: u16,
}

impl<Msg> ColumnBuilder<Msg> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            spacing: 1,
        }
    }

    /// Create a column builder from existing items (for macros)
    pub fn from_items(items: Vec<(LayoutConstraint, Element<Msg>)>) -> Self {
        Self { items, spacing: 1 }
    }

    /// Add a child with an explicit layout constraint
    pub fn add(mut self, child: Element<Msg>, constraint: LayoutConstraint) -> Self {
        self.items.push((constraint, child));
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Column {
            items: self.items,
            spacing: self.spacing,
        }
    }
}

impl<Msg> Default for ColumnBuilder<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for row layouts
pub struct RowBuilder<Msg> {
    pub(crate) items: Vec<(LayoutConstraint, Element<Msg>)>,
    pub(crate) spacing: u16,
}

impl<Msg> RowBuilder<Msg> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            spacing: 1,
        }
    }

    pub fn from_items(items: Vec<(LayoutConstraint, Element<Msg>)>) -> Self {
        Self { items, spacing: 1 }
    }

    pub fn add(mut self, child: Element<Msg>, constraint: LayoutConstraint) -> Self {
        self.items.push((constraint, child));
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Row {
            items: self.items,
            spacing: self.spacing,
        }
    }
}

impl<Msg> Default for RowBuilder<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for panels
pub struct PanelBuilder<Msg> {
    pub(crate) child: Box<Element<Msg>>,
    pub(crate) title: Option<String>,
    pub(crate) width: Option<u16>,
    pub(crate) height: Option<u16>,
}

impl<Msg> PanelBuilder<Msg> {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Panel {
            child: self.child,
            title: self.title,
            width: self.width,
            height: self.height,
        }
    }
}
