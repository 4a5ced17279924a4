use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EnterProducts,
    ShowProducts,
    ShowPriceExtremes,
    SortByUnitPrice,
    SortByQuantity,
    Exit,
}

impl MenuChoice {
    /// Anything other than `1`..`6` (surrounding whitespace ignored) is not a choice.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::EnterProducts),
            "2" => Some(MenuChoice::ShowProducts),
            "3" => Some(MenuChoice::ShowPriceExtremes),
            "4" => Some(MenuChoice::SortByUnitPrice),
            "5" => Some(MenuChoice::SortByQuantity),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub fn render_menu() -> String {
    let lines = [
        style("========== MAIN MENU ==========").magenta().bold().to_string(),
        style("1. Enter product list").cyan().to_string(),
        style("2. Display all products").green().to_string(),
        style("3. Show cheapest and most expensive product").yellow().to_string(),
        style("4. Sort products by unit price").magenta().to_string(),
        style("5. Sort products by quantity").blue().to_string(),
        style("6. Exit").red().to_string(),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::EnterProducts));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::ShowProducts));
        assert_eq!(MenuChoice::parse("3\n"), Some(MenuChoice::ShowPriceExtremes));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::SortByUnitPrice));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::SortByQuantity));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
    }

    #[test]
    fn test_parse_rejects_other_input() {
        for input in ["", "0", "7", "one", "1 2", "-1"] {
            assert_eq!(MenuChoice::parse(input), None, "input: {:?}", input);
        }
    }

    #[test]
    fn test_menu_lists_every_option() {
        let menu = console::strip_ansi_codes(&render_menu()).to_string();
        for option in ["1. ", "2. ", "3. ", "4. ", "5. ", "6. Exit"] {
            assert!(menu.contains(option));
        }
    }
}
