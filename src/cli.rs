use thiserror::Error;

/// A fully resolved command, ready for dispatch. Parsing validates the
/// method/resource pair up front; handlers never re-check argument
/// shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Get {
        id: String,
    },
    Create {
        title: String,
        price: String,
        category: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("you must specify a method and a resource")]
    MissingResource,

    #[error("method \"{0}\" is not valid. Available methods: GET, POST, DELETE")]
    InvalidMethod(String),

    #[error("wrong parameters for GET products")]
    TooManyGetParams,

    #[error("you must specify the product id")]
    MissingId,

    #[error("invalid resource. Use \"products\" or \"products/<id>\"")]
    InvalidGetResource,

    #[error("invalid resource. Use \"products\"")]
    InvalidPostResource,

    #[error("you must provide a title, a price and a category")]
    MissingCreateFields,

    #[error("wrong format. Use DELETE products/<id>")]
    InvalidDeleteResource,
}

/// Resolves the raw argument list (program name already stripped) into
/// a command. `help` and `--help` are matched case-sensitively and
/// only in first position; the method token is matched
/// case-insensitively.
pub fn parse(args: &[String]) -> Result<Command, UsageError> {
    let method = match args.first() {
        None => return Ok(Command::Help),
        Some(first) if first == "help" || first == "--help" => return Ok(Command::Help),
        Some(first) => first.as_str(),
    };

    let resource = args
        .get(1)
        .map(String::as_str)
        .ok_or(UsageError::MissingResource)?;
    let params = &args[2..];

    match method.to_uppercase().as_str() {
        "GET" => parse_get(resource, params),
        "POST" => parse_post(resource, params),
        "DELETE" => parse_delete(resource),
        _ => Err(UsageError::InvalidMethod(method.to_string())),
    }
}

fn parse_get(resource: &str, params: &[String]) -> Result<Command, UsageError> {
    if resource == "products" {
        return match params {
            [] => Ok(Command::List),
            [id] => Ok(Command::Get { id: id.clone() }),
            _ => Err(UsageError::TooManyGetParams),
        };
    }

    if let Some(rest) = resource.strip_prefix("products/") {
        return match id_segment(rest) {
            Some(id) => Ok(Command::Get { id }),
            None => Err(UsageError::MissingId),
        };
    }

    Err(UsageError::InvalidGetResource)
}

fn parse_post(resource: &str, params: &[String]) -> Result<Command, UsageError> {
    if resource != "products" {
        return Err(UsageError::InvalidPostResource);
    }
    if params.len() < 3 {
        return Err(UsageError::MissingCreateFields);
    }

    let (title, price, category) = split_create_params(params);
    Ok(Command::Create {
        title,
        price,
        category,
    })
}

fn parse_delete(resource: &str) -> Result<Command, UsageError> {
    if let Some(rest) = resource.strip_prefix("products/") {
        return match id_segment(rest) {
            Some(id) => Ok(Command::Delete { id }),
            None => Err(UsageError::MissingId),
        };
    }

    Err(UsageError::InvalidDeleteResource)
}

/// First path segment after `products/`; anything past a further `/`
/// is ignored. Empty segment means the id is missing.
fn id_segment(rest: &str) -> Option<String> {
    let id = rest.split('/').next().unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Splits a variadic create parameter list (length >= 3). The last two
/// entries are always price and category; everything before them forms
/// the title, joined with single spaces, so a title may span several
/// whitespace-separated tokens.
fn split_create_params(params: &[String]) -> (String, String, String) {
    let n = params.len();
    debug_assert!(n >= 3);
    let title = params[..n - 2].join(" ");
    (title, params[n - 2].clone(), params[n - 1].clone())
}

pub fn help_text() -> String {
    let rule = "=".repeat(50);
    format!(
        "\n\
TIENDA ONLINE CLI - HELP\n\
{rule}\n\
Available commands:\n\
\n\
List all products:\n\
    tienda GET products\n\
\n\
Get a single product:\n\
    tienda GET products/<id>\n\
    Example: tienda GET products/15\n\
\n\
Create a product:\n\
    tienda POST products <title> <price> <category>\n\
    Example: tienda POST products T-Shirt-Rex 300 remeras\n\
\n\
Delete a product:\n\
    tienda DELETE products/<id>\n\
    Example: tienda DELETE products/7\n\
\n\
Show this help:\n\
    tienda help\n\
{rule}"
    )
}
