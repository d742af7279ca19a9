//! Presentation enumerations. Each serializes as its camelCase wire string,
//! never as a numeric code.

closed_enum! {
    /// Rendering style of a choice-set input.
    pub enum ChoiceInputStyle {
        Compact => "compact",
        Expanded => "expanded",
    }
}

closed_enum! {
    /// Background style of a container or column.
    pub enum ContainerStyle {
        Default => "default",
        Emphasis => "emphasis",
    }
}

closed_enum! {
    pub enum HorizontalAlignment {
        Center => "center",
        Left => "left",
        Right => "right",
    }
}

closed_enum! {
    pub enum ImageSize {
        Large => "large",
        Medium => "medium",
        Small => "small",
    }
}

closed_enum! {
    /// `person` crops the image to a circle.
    pub enum ImageStyle {
        Default => "default",
        Person => "person",
    }
}

closed_enum! {
    /// Gap between an element and its preceding sibling.
    pub enum Spacing {
        Default => "default",
        ExtraLarge => "extraLarge",
        Large => "large",
        Medium => "medium",
        None => "none",
        Padding => "padding",
        Small => "small",
    }
}

closed_enum! {
    pub enum TextColor {
        Accent => "accent",
        Attention => "attention",
        Dark => "dark",
        Default => "default",
        Good => "good",
        Light => "light",
        Warning => "warning",
    }
}

closed_enum! {
    pub enum TextSize {
        Default => "default",
        ExtraLarge => "extraLarge",
        Large => "large",
        Medium => "medium",
        Small => "small",
    }
}

closed_enum! {
    pub enum TextWeight {
        Bolder => "bolder",
        Default => "default",
        Lighter => "lighter",
    }
}

closed_enum! {
    /// Keyword forms of a column width.
    pub enum WidthKeyword {
        Auto => "auto",
        Stretch => "stretch",
    }
}
