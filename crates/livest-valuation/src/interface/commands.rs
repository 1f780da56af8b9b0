//! Command parsing for the interactive valuation prompt

use crate::engine::HouseQuery;
use crate::error::{Result, ValuationError};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Value a house
    Estimate { query: HouseQuery },
    /// Monthly instalment; missing values come from the last valuation and config
    Emi {
        principal: Option<f64>,
        rate: Option<f64>,
        years: Option<u32>,
    },
    /// List localities, optionally filtered by name or city
    Localities { filter: Option<String> },
    /// Send a lead inquiry
    Contact {
        name: String,
        email: String,
        message: String,
    },
    /// Show help
    Help,
    /// Exit the prompt
    Exit,
}

impl Command {
    /// Parse a command from user input.
    ///
    /// Text without a leading `/` is treated as a locality search.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ValuationError::CommandError("Empty input".to_string()));
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Localities {
                filter: Some(input.to_string()),
            });
        };

        let parts: Vec<&str> = rest.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            return Err(ValuationError::CommandError("Empty command".to_string()));
        };

        match cmd.to_lowercase().as_str() {
            "estimate" | "e" | "value" => parse_estimate(args),
            "emi" | "loan" => {
                let principal = args.first().map(|s| parse_number::<f64>("principal", s)).transpose()?;
                let rate = args.get(1).map(|s| parse_number::<f64>("rate", s)).transpose()?;
                let years = args.get(2).map(|s| parse_number::<u32>("years", s)).transpose()?;
                Ok(Command::Emi {
                    principal,
                    rate,
                    years,
                })
            }
            "localities" | "l" | "list" => Ok(Command::Localities {
                filter: (!args.is_empty()).then(|| args.join(" ")),
            }),
            "contact" | "c" => parse_contact(args),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => Err(ValuationError::CommandError(format!("Unknown command: {other}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
Livest Valuation Commands
=========================

  /estimate <sqft> [bhk] [bathrooms] [locality...]
                         Value a property (defaults: 3 BHK, 3 bath, Tellapur)
  /emi [amount] [rate%] [years]
                         Monthly instalment; amount defaults to the last estimate
  /localities [query]    List localities, filtered by name or city
  /contact <name...> <email> <message...>
                         Ask an advisor to get in touch
  /help                  Show help
  /exit                  Exit

Aliases: /e = /estimate  /l = /localities  /c = /contact  /q = /exit

Anything not starting with '/' searches localities.
"
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Estimate { .. } => "Property valuation",
            Command::Emi { .. } => "Loan EMI estimate",
            Command::Localities { .. } => "Locality listing",
            Command::Contact { .. } => "Lead inquiry",
            Command::Help => "Show help",
            Command::Exit => "Exit the prompt",
        }
    }
}

fn parse_number<T: std::str::FromStr>(what: &str, raw: &str) -> Result<T> {
    raw.replace(',', "")
        .parse()
        .map_err(|_| ValuationError::CommandError(format!("'{raw}' is not a valid {what}")))
}

fn parse_estimate(args: &[&str]) -> Result<Command> {
    let Some(sqft) = args.first() else {
        return Err(ValuationError::CommandError(
            "Missing area for estimate command".to_string(),
        ));
    };

    let mut query = HouseQuery::default().with_sqft(parse_number("area", sqft)?);
    let mut rest = &args[1..];

    // up to two more numbers: rooms then bathrooms
    if let Some(bhk) = rest.first().and_then(|s| s.parse::<u32>().ok()) {
        query = query.with_bhk(bhk);
        rest = &rest[1..];
        if let Some(bathrooms) = rest.first().and_then(|s| s.parse::<u32>().ok()) {
            query = query.with_bathrooms(bathrooms);
            rest = &rest[1..];
        }
    }

    if !rest.is_empty() {
        query = query.with_neighborhood(rest.join(" "));
    }

    Ok(Command::Estimate { query })
}

fn parse_contact(args: &[&str]) -> Result<Command> {
    let Some(at) = args.iter().position(|s| s.contains('@')) else {
        return Err(ValuationError::CommandError(
            "Contact needs an email address".to_string(),
        ));
    };

    let name = args[..at].join(" ");
    let message = args[at + 1..].join(" ");
    if name.is_empty() {
        return Err(ValuationError::CommandError(
            "Contact needs a name before the email".to_string(),
        ));
    }

    Ok(Command::Contact {
        name,
        email: args[at].to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_estimate() {
        let cmd = Command::parse("/estimate 2400 3 3 Tellapur").unwrap();
        assert_eq!(
            cmd,
            Command::Estimate {
                query: HouseQuery::new(2400, 3, 3, "Tellapur")
            }
        );

        let cmd = Command::parse("/e 1,850 2 Banjara Hills").unwrap();
        assert_eq!(
            cmd,
            Command::Estimate {
                query: HouseQuery::new(1850, 2, 3, "Banjara Hills")
            }
        );
    }

    #[test]
    fn test_parse_estimate_clamps_rooms() {
        let cmd = Command::parse("/estimate 4000 14").unwrap();
        assert_eq!(
            cmd,
            Command::Estimate {
                query: HouseQuery::new(4000, 10, 3, "Tellapur")
            }
        );
    }

    #[test]
    fn test_parse_estimate_errors() {
        assert!(Command::parse("/estimate").is_err());
        assert!(Command::parse("/estimate big").is_err());
        assert!(Command::parse("/estimate -5").is_err());
    }

    #[test]
    fn test_parse_emi() {
        assert_eq!(
            Command::parse("/emi").unwrap(),
            Command::Emi {
                principal: None,
                rate: None,
                years: None
            }
        );
        assert_eq!(
            Command::parse("/loan 50,00,000 9.1 15").unwrap(),
            Command::Emi {
                principal: Some(5_000_000.0),
                rate: Some(9.1),
                years: Some(15)
            }
        );
        assert!(Command::parse("/emi 100 fast").is_err());
    }

    #[test]
    fn test_parse_localities_and_search() {
        assert_eq!(
            Command::parse("/l").unwrap(),
            Command::Localities { filter: None }
        );
        assert_eq!(
            Command::parse("/localities jubilee hills").unwrap(),
            Command::Localities {
                filter: Some("jubilee hills".to_string())
            }
        );
        assert_eq!(
            Command::parse("kochi").unwrap(),
            Command::Localities {
                filter: Some("kochi".to_string())
            }
        );
    }

    #[test]
    fn test_parse_contact() {
        let cmd = Command::parse("/contact Asha Rao asha@example.com Call me after 6").unwrap();
        assert_eq!(
            cmd,
            Command::Contact {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
                message: "Call me after 6".to_string(),
            }
        );

        assert!(Command::parse("/contact Asha Rao").is_err());
        assert!(Command::parse("/contact asha@example.com hi").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(Command::parse("/help").unwrap(), Command::Help);
        assert_eq!(Command::parse("/Q").unwrap(), Command::Exit);
        assert!(Command::parse("   ").is_err());
        assert!(Command::parse("/").is_err());
        assert!(Command::parse("/bogus").is_err());
        assert_eq!(Command::Help.description(), "Show help");
    }
}
