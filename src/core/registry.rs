//! Category registry - Static form and table schemas per product category.
//!
//! Each category owns one ordered column list. The capture form derives its inputs from
//! that list and the invoice renders its table from the same list, so the seven
//! categories are described once instead of as separate form and table variants.

use crate::{
    entities::Category,
    errors::Result,
};

/// How a column's value is rendered on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// Plain, escaped text
    Text,
    /// Embedded base64 image
    Image,
}

/// Where a column's value lives on a [`crate::entities::ProductOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPath {
    /// Key of the order's `data` object
    Data(&'static str),
    /// First entry of the order's `images`
    FirstImage,
}

/// One `(label, path, renderer)` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header text, also the form input label
    pub label: &'static str,
    /// Where the value is read from
    pub path: DataPath,
    /// How the value is shown on the invoice
    pub renderer: Renderer,
    /// Value the capture form starts with
    pub default: Option<&'static str>,
}

/// Kind of input a capture form shows for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text
    Text,
    /// Numeric value, stored as a JSON number
    Number,
    /// File upload, stored base64 encoded
    Image,
}

/// Capture form input derived from a [`Column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField {
    /// Form key, also the `data` key on the resulting order
    pub name: &'static str,
    /// Label shown next to the input
    pub label: &'static str,
    /// Input widget kind
    pub kind: InputKind,
    /// Pre-filled value
    pub default: Option<&'static str>,
}

/// Form and table schema of one category.
#[derive(Debug)]
pub struct CategorySchema {
    /// Category this schema describes
    pub category: Category,
    /// Invoice table heading
    pub title: &'static str,
    /// Icon shown on the category picker card
    pub card_image: &'static str,
    /// Ordered columns shared by the form and the invoice table
    pub columns: &'static [Column],
}

impl CategorySchema {
    /// Inputs of the capture form, in column order.
    #[must_use]
    pub fn input_fields(&self) -> Vec<InputField> {
        self.columns
            .iter()
            .map(|column| match column.path {
                DataPath::Data(key) => InputField {
                    name: key,
                    label: column.label,
                    kind: if NUMERIC_FIELDS.contains(&key) {
                        InputKind::Number
                    } else {
                        InputKind::Text
                    },
                    default: column.default,
                },
                DataPath::FirstImage => InputField {
                    name: IMAGE_FIELD,
                    label: column.label,
                    kind: InputKind::Image,
                    default: None,
                },
            })
            .collect()
    }

    /// Looks up a capture input by form key.
    #[must_use]
    pub fn input_field(&self, name: &str) -> Option<InputField> {
        self.input_fields().into_iter().find(|field| field.name == name)
    }
}

/// Form key used for the image upload of every category.
pub const IMAGE_FIELD: &str = "image";

const NUMERIC_FIELDS: [&str; 2] = ["quantity", "rolls"];

const fn text(label: &'static str, key: &'static str) -> Column {
    Column {
        label,
        path: DataPath::Data(key),
        renderer: Renderer::Text,
        default: None,
    }
}

const fn image(label: &'static str) -> Column {
    Column {
        label,
        path: DataPath::FirstImage,
        renderer: Renderer::Image,
        default: None,
    }
}

static CURTAINS: CategorySchema = CategorySchema {
    category: Category::Curtains,
    title: "Curtain Orders",
    card_image: "https://ik.imagekit.io/tealcdn2023/assets/curtains.png?updatedAt=1708796208451",
    columns: &[
        text("Description", "description"),
        text("Size", "size"),
        text("Quantity", "quantity"),
        text("Type of Stitching", "stitchingType"),
        text("Catalogue Name", "catalogueName"),
        text("Fabric Code", "fabricCode"),
        image("Fabric Image"),
        text("Remarks", "remarks"),
    ],
};

static SOFAS: CategorySchema = CategorySchema {
    category: Category::Sofas,
    title: "Sofa Orders",
    card_image: "https://cdn-icons-png.flaticon.com/512/5781/5781883.png",
    columns: &[
        text("Title", "title"),
        text("Description", "description"),
        text("Size", "size"),
        Column {
            label: "Shape / Model",
            path: DataPath::Data("shapeModel"),
            renderer: Renderer::Text,
            default: Some("L-Shaped"),
        },
        text("Fabric Name / Code", "fabricNameCode"),
        image("Reference Image"),
        text("Remarks", "remarks"),
    ],
};

static BLINDS: CategorySchema = CategorySchema {
    category: Category::Blinds,
    title: "Blind Orders",
    card_image: "https://ik.imagekit.io/tealcdn2023/assets/blinds.png?updatedAt=1708795944875",
    columns: &[
        text("Description", "description"),
        text("Size", "size"),
        text("Quantity", "quantity"),
        text("Type of Blinds", "typeOfBlinds"),
        text("Catalogue Name", "catalogueName"),
        text("Fabric Code", "fabricCode"),
        image("Fabric Image"),
        text("Remarks", "remarks"),
    ],
};

static FLOORINGS: CategorySchema = CategorySchema {
    category: Category::Floorings,
    title: "Flooring Orders",
    card_image: "https://ik.imagekit.io/tealcdn2023/assets/flooring.png?updatedAt=1708795833951",
    columns: &[
        text("Description", "description"),
        text("Area", "area"),
        text("Type of Flooring", "typeOfFlooring"),
        text("Catalogue Name", "catalogueName"),
        text("Product Code", "productCode"),
        image("Reference Image"),
        text("Remarks", "remarks"),
    ],
};

static WALLPAPER: CategorySchema = CategorySchema {
    category: Category::Wallpaper,
    title: "Wallpaper Orders",
    card_image: "https://ik.imagekit.io/tealcdn2023/assets/wallpaper.png?updatedAt=1708795761824",
    columns: &[
        text("Description", "description"),
        text("Wall Size", "size"),
        text("Rolls", "rolls"),
        text("Catalogue Name", "catalogueName"),
        text("Design Code", "designCode"),
        image("Design Image"),
        text("Remarks", "remarks"),
    ],
};

static FURNITURE: CategorySchema = CategorySchema {
    category: Category::Furniture,
    title: "Furniture Orders",
    card_image: "https://ik.imagekit.io/tealcdn2023/assets/Decor.png?updatedAt=1708795608010",
    columns: &[
        text("Title", "title"),
        text("Description", "description"),
        text("Size", "size"),
        text("Material", "material"),
        text("Quantity", "quantity"),
        image("Reference Image"),
        text("Remarks", "remarks"),
    ],
};

static CARPETS: CategorySchema = CategorySchema {
    category: Category::Carpets,
    title: "Carpet Orders",
    card_image: "https://cdn.iconscout.com/icon/premium/png-256-thumb/carpet-1469898-1243937.png?f=webp",
    columns: &[
        text("Description", "description"),
        text("Size", "size"),
        text("Quantity", "quantity"),
        text("Material", "material"),
        text("Design Code", "designCode"),
        image("Reference Image"),
        text("Remarks", "remarks"),
    ],
};

impl Category {
    /// Schema of this category.
    #[must_use]
    pub const fn schema(self) -> &'static CategorySchema {
        match self {
            Self::Curtains => &CURTAINS,
            Self::Sofas => &SOFAS,
            Self::Blinds => &BLINDS,
            Self::Floorings => &FLOORINGS,
            Self::Wallpaper => &WALLPAPER,
            Self::Furniture => &FURNITURE,
            Self::Carpets => &CARPETS,
        }
    }
}

/// Looks up a schema by category name.
///
/// # Errors
/// Returns `UnknownCategory` when the name is outside the closed category set.
pub fn schema_for(name: &str) -> Result<&'static CategorySchema> {
    Category::parse(name).map(Category::schema)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_every_category_has_a_matching_schema() {
        for category in Category::ALL {
            let schema = category.schema();
            assert_eq!(schema.category, category);
            assert!(!schema.columns.is_empty());

            // Exactly one image column per category
            let images = schema
                .columns
                .iter()
                .filter(|c| c.renderer == Renderer::Image)
                .count();
            assert_eq!(images, 1, "{category} should have one image column");
        }
    }

    #[test]
    fn test_schema_for_unknown_category() {
        let err = schema_for("Lamps").unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { .. }));
    }

    #[test]
    fn test_blinds_columns_match_invoice_layout() {
        let schema = schema_for("Blinds").unwrap();
        let labels: Vec<&str> = schema.columns.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec![
                "Description",
                "Size",
                "Quantity",
                "Type of Blinds",
                "Catalogue Name",
                "Fabric Code",
                "Fabric Image",
                "Remarks",
            ]
        );
    }

    #[test]
    fn test_input_fields_follow_columns() {
        let fields = Category::Sofas.schema().input_fields();
        assert_eq!(fields.len(), Category::Sofas.schema().columns.len());

        let shape = Category::Sofas.schema().input_field("shapeModel").unwrap();
        assert_eq!(shape.default, Some("L-Shaped"));
        assert_eq!(shape.kind, InputKind::Text);

        let image = Category::Sofas.schema().input_field(IMAGE_FIELD).unwrap();
        assert_eq!(image.kind, InputKind::Image);

        let quantity = Category::Blinds.schema().input_field("quantity").unwrap();
        assert_eq!(quantity.kind, InputKind::Number);
    }
}
