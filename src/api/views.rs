//! HTML rendering: pure functions from view-model data to markup.
//!
//! Nothing in here touches HTTP or storage; handlers pass in the data and
//! get a page back. All interpolated user data goes through [`escape`].

use crate::contacts::{Category, CategoryFilter, Contact};
use std::fmt::Write;

/// Landing page for anonymous visitors.
#[must_use]
pub(crate) fn landing(flash: Option<&str>) -> String {
    layout(
        "Kontakti",
        false,
        flash,
        r#"<p>Your personal contact list.</p>
<p><a href="/signup">Sign up</a> or <a href="/signin">Sign in</a></p>"#,
    )
}

#[must_use]
pub(crate) fn signup_form(flash: Option<&str>) -> String {
    layout(
        "Sign up",
        false,
        flash,
        r#"<h2>Sign up</h2>
<form method="post" action="/signup">
  <label>Username <input type="text" name="username"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Sign up</button>
</form>"#,
    )
}

#[must_use]
pub(crate) fn signin_form(flash: Option<&str>) -> String {
    layout(
        "Sign in",
        false,
        flash,
        r#"<h2>Sign in</h2>
<form method="post" action="/signin">
  <label>Username <input type="text" name="username"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Sign in</button>
</form>"#,
    )
}

/// Category index shown after signing in.
#[must_use]
pub(crate) fn category_index(username: &str, flash: Option<&str>) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h2>{}'s contacts</h2>\n<ul>\n", escape(username));
    body.push_str("  <li><a href=\"/categories/all\">all</a></li>\n");
    for category in Category::ALL {
        let name = category.as_str();
        let _ = writeln!(body, "  <li><a href=\"/categories/{name}\">{name}</a></li>");
    }
    body.push_str("</ul>\n<p><a href=\"/new\">Add a new contact</a></p>");

    layout("Your contacts", true, flash, &body)
}

/// One category's contacts, or the flattened view for `all`.
#[must_use]
pub(crate) fn contact_table(
    filter: CategoryFilter,
    contacts: &[Contact],
    flash: Option<&str>,
) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h2>{}</h2>\n", filter.as_str());

    if contacts.is_empty() {
        body.push_str("<p>No contacts here yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n  <tr><th>Name</th><th>Mobile</th><th>Home</th><th>Email</th></tr>\n",
        );
        for contact in contacts {
            let _ = writeln!(
                body,
                "  <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&contact.name),
                escape(&contact.mobile),
                escape(&contact.home),
                escape(&contact.email),
            );
        }
        body.push_str("</table>\n");
    }
    body.push_str("<p><a href=\"/list\">Back to categories</a></p>");

    layout("Contacts", true, flash, &body)
}

#[must_use]
pub(crate) fn new_contact_form(flash: Option<&str>) -> String {
    let mut options = String::new();
    for category in Category::ALL {
        let name = category.as_str();
        let _ = writeln!(options, "    <option value=\"{name}\">{name}</option>");
    }

    let body = format!(
        r#"<h2>New contact</h2>
<form method="post" action="/new">
  <label>Name <input type="text" name="contact"></label>
  <label>Category <select name="category">
{options}  </select></label>
  <label>Mobile <input type="text" name="mobile"></label>
  <label>Home <input type="text" name="home"></label>
  <label>Email <input type="text" name="email"></label>
  <button type="submit">Add contact</button>
</form>
<p><a href="/list">Back to categories</a></p>"#
    );

    layout("New contact", true, flash, &body)
}

fn layout(title: &str, signed_in: bool, flash: Option<&str>, body: &str) -> String {
    let mut page = String::new();
    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>{}</title>\n</head>\n<body>\n<header>\n  <h1><a href=\"/\">Kontakti</a></h1>\n",
        escape(title)
    );
    if signed_in {
        page.push_str(
            "  <form method=\"post\" action=\"/signout\"><button type=\"submit\">Sign out</button></form>\n",
        );
    }
    page.push_str("</header>\n");
    if let Some(message) = flash {
        let _ = writeln!(page, "<p class=\"flash\">{}</p>", escape(message));
    }
    let _ = write!(page, "<main>\n{body}\n</main>\n</body>\n</html>\n");
    page
}

/// Minimal HTML escaping for text and attribute positions.
#[must_use]
pub(crate) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_flash_is_rendered_when_present() {
        let page = landing(Some("Goodbye! See you soon."));
        assert!(page.contains("Goodbye! See you soon."));
        assert!(!landing(None).contains("class=\"flash\""));
    }

    #[test]
    fn test_contact_values_are_escaped() {
        let contacts = vec![Contact {
            name: "<script>".to_string(),
            mobile: String::new(),
            home: String::new(),
            email: String::new(),
        }];
        let page = contact_table(CategoryFilter::All, &contacts, None);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn test_category_index_links_every_bucket() {
        let page = category_index("admin", None);
        for target in ["all", "family", "friends", "work"] {
            assert!(page.contains(&format!("/categories/{target}")));
        }
        assert!(page.contains("/new"));
        assert!(page.contains("/signout"));
    }
}
