//! Contact notification body. Layout only, no styling beyond what mail clients need to stay readable.
use crate::utils::ContactForm;

pub fn subject(name: &str) -> String {
    format!("New contact form submission from {name}")
}

pub fn render_html(form: &ContactForm) -> String {
    let name = escape(&form.name);
    let email = escape(&form.email);
    let message = escape(&form.message);

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>New contact form submission from {name}</title></head>
<body style="background-color:#f6f9fc;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif">
<div style="background-color:#ffffff;margin:0 auto;padding:20px 40px 48px;max-width:600px">
<h1>New Contact Form Submission</h1>
<p><strong>From:</strong> {name}</p>
<p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
<p><strong>Message:</strong></p>
<p style="white-space:pre-wrap">{message}</p>
<p style="color:#666;font-size:14px">This message was sent from your portfolio contact form.</p>
</div>
</body>
</html>"#
    )
}

pub fn render_text(form: &ContactForm) -> String {
    format!(
        "New Contact Form Submission\n\nFrom: {}\nEmail: {}\n\nMessage:\n{}\n\nThis message was sent from your portfolio contact form.\n",
        form.name, form.email, form.message
    )
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{escape, render_html, render_text, subject};
    use crate::utils::ContactForm;

    fn form() -> ContactForm {
        ContactForm {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            message: "Line one\nLine two".to_string(),
        }
    }

    #[test]
    fn test_subject() {
        assert_eq!(subject("Jane"), "New contact form submission from Jane");
    }

    #[test]
    fn test_html_contains_fields() {
        let html = render_html(&form());

        assert!(html.contains("<strong>From:</strong> Jane"));
        assert!(html.contains(r#"<a href="mailto:jane@x.com">jane@x.com</a>"#));
        assert!(html.contains("Line one\nLine two"));
    }

    #[test]
    fn test_html_escapes_input() {
        let mut form = form();
        form.message = "<script>alert('x')</script> & more".to_string();

        let html = render_html(&form);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn test_text_is_raw() {
        let text = render_text(&form());

        assert!(text.contains("From: Jane\nEmail: jane@x.com"));
        assert!(text.contains("Line one\nLine two"));
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escape("plain text"), "plain text");
        assert_eq!(escape(""), "");
    }
}
