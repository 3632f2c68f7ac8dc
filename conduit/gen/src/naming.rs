//! Case conversion for generated names.
//!
//! Route names are snake_case and service names PascalCase. Generated types
//! need the PascalCase form of a route (`get_todo` -> `GetTodo`) and the
//! output file needs the snake_case form of a service (`TodoApi` -> `todo_api`).

/// Converts a snake_case name to PascalCase.
///
/// ## Examples
///
/// ```
/// use conduit_gen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("get_todo"), "GetTodo");
/// assert_eq!(to_pascal_case("clear_completed"), "ClearCompleted");
/// ```
pub fn to_pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Converts a PascalCase (or already snake_case) name to snake_case.
///
/// ## Examples
///
/// ```
/// use conduit_gen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("TodoApi"), "todo_api");
/// assert_eq!(to_snake_case("HTTPGateway"), "http_gateway");
/// assert_eq!(to_snake_case("todo_api"), "todo_api");
/// ```
pub fn to_snake_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .flat_map(split_camel_case)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Splits a CamelCase string into words.
///
/// - "TodoApi" -> ["Todo", "Api"]
/// - "HTTPGateway" -> ["HTTP", "Gateway"]
/// - "todo" -> ["todo"]
fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    for i in 1..chars.len() {
        let (offset, current) = chars[i];
        let prev = chars[i - 1].1;

        // "todoApi" -> "todo", "Api"; "HTTPGateway" -> "HTTP", "Gateway"
        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (i + 1 < chars.len() && chars[i + 1].1.is_lowercase() && prev.is_uppercase()));

        if is_new_word {
            if offset > word_start {
                words.push(&s[word_start..offset]);
            }
            word_start = offset;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_camel_case_multi_word() {
        assert_eq!(split_camel_case("TodoApi"), vec!["Todo", "Api"]);
    }

    #[test]
    fn split_camel_case_acronym_at_start() {
        assert_eq!(split_camel_case("HTTPGateway"), vec!["HTTP", "Gateway"]);
    }

    #[test]
    fn split_camel_case_trailing_acronym() {
        assert_eq!(split_camel_case("OpenAI"), vec!["Open", "AI"]);
    }

    #[test]
    fn split_camel_case_lowercase_and_empty() {
        assert_eq!(split_camel_case("todo"), vec!["todo"]);
        assert_eq!(split_camel_case(""), Vec::<&str>::new());
    }

    #[test]
    fn pascal_case_skips_empty_words() {
        assert_eq!(to_pascal_case("_private__name"), "PrivateName");
        assert_eq!(to_pascal_case("v2_items"), "V2Items");
    }

    #[test]
    fn snake_case_of_digits() {
        assert_eq!(to_snake_case("Store2Api"), "store2_api");
    }
}
