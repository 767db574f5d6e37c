use crate::catalog::{Category, Work};
use crate::config::WorkDefaults;
use crate::console::Console;
use crate::constants::IMAGE_PREFIX;
use crate::error::Result;
use crate::scanner::default_title;

/// Shared values applied to every file in batch mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDefaults {
    pub category: Category,
    pub price: u64,
}

/// Current local year and month, `YYYY-MM`.
pub fn current_date_stamp() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

/// Price typed by the user. Empty, non-numeric or negative input counts as 0.
pub fn parse_price(input: &str) -> u64 {
    input.trim().parse().unwrap_or(0)
}

/// Numbered category menu answer: `2` picks painting, anything else the default.
pub fn parse_category_choice(input: &str, default: Category) -> Category {
    match input.trim() {
        "1" => Category::Photography,
        "2" => Category::Painting,
        _ => default,
    }
}

/// Batch category answer: a menu number or a category name, else the default.
pub fn parse_category_name(input: &str, default: Category) -> Category {
    match input.trim() {
        "" => default,
        "1" | "2" => parse_category_choice(input, default),
        name => name.parse().unwrap_or(default),
    }
}

fn menu_number(category: Category) -> &'static str {
    match category {
        Category::Photography => "1",
        Category::Painting => "2",
    }
}

/// Prompts for the metadata of one image.
///
/// `source_filename` seeds the default title; the record is stored under
/// `output_filename`.
pub fn prompt_work_info<C: Console + ?Sized>(
    console: &mut C,
    source_filename: &str,
    output_filename: &str,
    defaults: &WorkDefaults,
    date: &str,
) -> Result<Work> {
    console.write_line("")?;
    console.write_line(&format!("{} Image: {}", IMAGE_PREFIX, source_filename))?;
    console.write_line(&"-".repeat(40))?;

    let title = console.ask_or("Title", &default_title(source_filename))?;

    console.write_line("")?;
    console.write_line("Categories:")?;
    console.write_line("  1. photography")?;
    console.write_line("  2. painting")?;
    let choice = console.ask_or("Choose category", menu_number(defaults.category))?;
    let category = parse_category_choice(&choice, defaults.category);

    console.info("Leave empty to skip the description")?;
    let description = console.ask("Description: ")?;

    console.info("Enter 0 to hide the price")?;
    let price = parse_price(&console.ask_or("Price", &defaults.price.to_string())?);

    Ok(Work {
        filename: output_filename.to_string(),
        title,
        category,
        description,
        price,
        date: date.to_string(),
    })
}

/// Prompts once for the category and price shared by a whole batch.
pub fn prompt_batch_defaults<C: Console + ?Sized>(
    console: &mut C,
    defaults: &WorkDefaults,
) -> Result<BatchDefaults> {
    console.header("Batch metadata")?;
    console.info("The same category and price are applied to every image")?;

    let category = parse_category_name(
        &console.ask_or("Default category", defaults.category.as_str())?,
        defaults.category,
    );
    let price = parse_price(&console.ask_or("Default price", &defaults.price.to_string())?);

    Ok(BatchDefaults { category, price })
}

/// Placeholder records for a batch, keyed by source filename until the
/// image is compressed.
pub fn batch_works(filenames: &[String], defaults: &BatchDefaults, date: &str) -> Vec<Work> {
    filenames
        .iter()
        .map(|filename| Work {
            filename: filename.clone(),
            title: default_title(filename),
            category: defaults.category,
            description: String::new(),
            price: defaults.price,
            date: date.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::TextConsole;
    use std::io::Cursor;

    fn scripted(input: &str) -> TextConsole<Cursor<Vec<u8>>, Vec<u8>> {
        TextConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("250"), 250);
        assert_eq!(parse_price(" 42 "), 42);
        assert_eq!(parse_price(""), 0);
    }

    #[test]
    fn test_parse_price_invalid_input_is_zero_on_purpose() {
        assert_eq!(parse_price("abc"), 0);
        assert_eq!(parse_price("12.50"), 0);
        assert_eq!(parse_price("-5"), 0);
        assert_eq!(parse_price("1,000"), 0);
    }

    #[test]
    fn test_parse_category_choice() {
        assert_eq!(
            parse_category_choice("2", Category::Photography),
            Category::Painting
        );
        assert_eq!(
            parse_category_choice("1", Category::Painting),
            Category::Photography
        );
        assert_eq!(
            parse_category_choice("painting", Category::Photography),
            Category::Photography
        );
    }

    #[test]
    fn test_parse_category_name() {
        assert_eq!(
            parse_category_name("Painting", Category::Photography),
            Category::Painting
        );
        assert_eq!(
            parse_category_name("2", Category::Photography),
            Category::Painting
        );
        assert_eq!(
            parse_category_name("sculpture", Category::Photography),
            Category::Photography
        );
        assert_eq!(
            parse_category_name("", Category::Painting),
            Category::Painting
        );
    }

    #[test]
    fn test_current_date_stamp_shape() {
        let stamp = current_date_stamp();
        assert_eq!(stamp.len(), 7);
        assert_eq!(&stamp[4..5], "-");
        assert!(stamp[..4].chars().all(|c| c.is_ascii_digit()));
        assert!(stamp[5..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_prompt_work_info_with_answers() {
        let mut console = scripted("Evening Tide\n2\nOil on canvas\n1500\n");
        let work = prompt_work_info(
            &mut console,
            "tide.png",
            "tide.jpg",
            &WorkDefaults::default(),
            "2026-10",
        )
        .unwrap();

        assert_eq!(
            work,
            Work {
                filename: "tide.jpg".to_string(),
                title: "Evening Tide".to_string(),
                category: Category::Painting,
                description: "Oil on canvas".to_string(),
                price: 1500,
                date: "2026-10".to_string(),
            }
        );
    }

    #[test]
    fn test_prompt_work_info_accepts_defaults() {
        let mut console = scripted("\n\n\n\n");
        let work = prompt_work_info(
            &mut console,
            "harbor.JPEG",
            "harbor.jpg",
            &WorkDefaults::default(),
            "2026-10",
        )
        .unwrap();

        assert_eq!(work.title, "harbor");
        assert_eq!(work.category, Category::Photography);
        assert_eq!(work.description, "");
        assert_eq!(work.price, 0);

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Title [harbor]: "));
        assert!(out.contains("Choose category [1]: "));
        assert!(out.contains("Price [0]: "));
    }

    #[test]
    fn test_prompt_work_info_non_numeric_price_is_zero() {
        let mut console = scripted("t\n1\n\nfree\n");
        let work = prompt_work_info(
            &mut console,
            "a.png",
            "a.jpg",
            &WorkDefaults::default(),
            "2026-10",
        )
        .unwrap();
        assert_eq!(work.price, 0);
    }

    #[test]
    fn test_prompt_batch_defaults() {
        let mut console = scripted("painting\n100\n");
        let defaults = prompt_batch_defaults(&mut console, &WorkDefaults::default()).unwrap();
        assert_eq!(
            defaults,
            BatchDefaults {
                category: Category::Painting,
                price: 100
            }
        );
    }

    #[test]
    fn test_prompt_batch_defaults_on_empty_input() {
        let mut console = scripted("");
        let defaults = prompt_batch_defaults(&mut console, &WorkDefaults::default()).unwrap();
        assert_eq!(defaults.category, Category::Photography);
        assert_eq!(defaults.price, 0);
    }

    #[test]
    fn test_batch_works_share_defaults() {
        let files = vec!["a.png".to_string(), "b.jpg".to_string(), "c.gif".to_string()];
        let defaults = BatchDefaults {
            category: Category::Painting,
            price: 100,
        };

        let works = batch_works(&files, &defaults, "2026-10");

        assert_eq!(works.len(), 3);
        assert_eq!(works[0].filename, "a.png");
        assert_eq!(works[2].title, "c");
        for work in &works {
            assert_eq!(work.category, Category::Painting);
            assert_eq!(work.price, 100);
            assert_eq!(work.date, "2026-10");
            assert!(work.description.is_empty());
        }
    }
}
