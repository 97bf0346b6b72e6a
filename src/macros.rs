/// Layout macros for ergonomic directive construction
///
/// These mirror the view-building shorthand hosts already use, so directive
/// code reads the same as the rest of the view layer.

/// Create a spacer element for vertical/horizontal gaps
///
/// # Examples
/// ```ignore
/// spacer!()     // 1 line gap
/// spacer!(3)    // 3 line gap
/// ```
#[macro_export]
macro_rules! spacer {
    () => {
        $crate::Element::text("")
    };
    ($height:expr) => {{
        let items: Vec<_> = (0..$height)
            .map(|_| ($crate::LayoutConstraint::Length(1), $crate::Element::text("")))
            .collect();
        $crate::element::ColumnBuilder::from_items(items).spacing(0).build()
    }};
}

/// Create a vertical column layout
///
/// # Examples
/// ```ignore
/// // Simple: all children get Fill(1) constraint
/// col![
///     Element::text("Header"),
///     Element::text("Body"),
/// ]
///
/// // With explicit constraints using => syntax
/// col![
///     Element::text("Header") => Length(1),
///     body => Fill(1),
/// ]
/// ```
#[macro_export]
macro_rules! col {
    // Without constraints - use Fill(1) default
    [ $($child:expr),* $(,)? ] => {{
        let mut builder = $crate::element::ColumnBuilder::new();
        $(
            builder = builder.add($child, $crate::LayoutConstraint::Fill(1));
        )*
        builder.build()
    }};

    // With explicit constraints using => syntax
    [ $($child:expr => $constraint:expr),* $(,)? ] => {{
        let mut builder = $crate::element::ColumnBuilder::new();
        $(
            builder = builder.add($child, $constraint);
        )*
        builder.build()
    }};
}

/// Create a horizontal row layout
///
/// Same shapes as [`col!`].
#[macro_export]
macro_rules! row {
    // Without constraints - use Fill(1) default
    [ $($child:expr),* $(,)? ] => {{
        let mut builder = $crate::element::RowBuilder::new();
        $(
            builder = builder.add($child, $crate::LayoutConstraint::Fill(1));
        )*
        builder.build()
    }};

    // With explicit constraints using => syntax
    [ $($child:expr => $constraint:expr),* $(,)? ] => {{
        let mut builder = $crate::element::RowBuilder::new();
        $(
            builder = builder.add($child, $constraint);
        )*
        builder.build()
    }};
}

/// Import all layout constraint types for shorter syntax
#[macro_export]
macro_rules! use_constraints {
    () => {
        use $crate::LayoutConstraint::{Fill, Length, Min};
    };
}

/// Create a button row with consistent spacing
///
/// # Examples
/// ```ignore
/// button_row![
///     ("cancel", "Cancel", Msg::Cancel),
///     ("confirm", "Confirm", Msg::Confirm),
/// ]
/// ```
#[macro_export]
macro_rules! button_row {
    [ $(($id:expr, $label:expr, $msg:expr)),* $(,)? ] => {{
        let mut builder = $crate::element::RowBuilder::new();
        let mut idx = 0;
        $(
            if idx > 0 {
                builder = builder.add(
                    $crate::Element::text("  "),
                    $crate::LayoutConstraint::Length(2)
                );
            }
            builder = builder.add(
                $crate::Element::button($id, $label)
                    .on_press($msg)
                    .build(),
                $crate::LayoutConstraint::Fill(1)
            );
            idx += 1;
        )*
        let _ = idx;
        builder.spacing(0).build()
    }};
}

/// Create a modal overlay (dimmed background with centered content)
///
/// # Examples
/// ```ignore
/// modal!(main_ui, modal_content)
/// modal!(main_ui, modal_content, Alignment::TopRight)
/// ```
#[macro_export]
macro_rules! modal {
    ($base:expr, $overlay:expr) => {
        $crate::Element::stack(vec![
            $crate::Layer::new($base),
            $crate::Layer::new($overlay).center().dim(true),
        ])
    };
    ($base:expr, $overlay:expr, $align:expr) => {
        $crate::Element::stack(vec![
            $crate::Layer::new($base),
            $crate::Layer::new($overlay).align($align).dim(true),
        ])
    };
}
