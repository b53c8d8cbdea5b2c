//! Markdown rendering for blog content.
//!
//! Produces an HTML fragment from markdown source with the extended dialect
//! the editor expects: tables, strikethrough, hard breaks on single
//! newlines, auto-linked bare URLs, and GitHub-style anchor ids on
//! headings. Raw HTML in the source is escaped to text, so the output never
//! carries markup the author did not write in markdown.
//!
//! The renderer is total: any input produces some HTML, empty input
//! produces the empty string.

use std::collections::{HashMap, VecDeque};

use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, html};

/// Render markdown source to an HTML fragment.
pub fn render(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events: Vec<Event<'_>> = Parser::new_ext(source, options).collect();
    let events = normalize_inline(events);
    let events = autolink(events);
    let events = anchor_headings(events);

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

/// Promote soft breaks to hard breaks and escape raw HTML to text.
fn normalize_inline(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    events
        .into_iter()
        .map(|ev| match ev {
            Event::SoftBreak => Event::HardBreak,
            Event::Html(raw) => Event::Text(raw),
            Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        })
        .collect()
}

/// Assign GitHub-style anchor ids to headings, deduplicating repeats with
/// `-1`, `-2`, ... suffixes.
fn anchor_headings(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut ids: VecDeque<String> = VecDeque::new();

    let mut current: Option<String> = None;
    for ev in &events {
        match ev {
            Event::Start(Tag::Heading { .. }) => current = Some(String::new()),
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = current.take() {
                    ids.push_back(heading_id(&text, &mut seen));
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(t);
                }
            }
            _ => {}
        }
    }

    events
        .into_iter()
        .map(|ev| match ev {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                let id = ids.pop_front().map(CowStr::from);
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                })
            }
            other => other,
        })
        .collect()
}

fn heading_id(text: &str, seen: &mut HashMap<String, usize>) -> String {
    let base = slugify_anchor(text);
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };
    let count = seen.entry(base.clone()).and_modify(|c| *c += 1).or_insert(0);
    if *count == 0 {
        base
    } else {
        format!("{base}-{count}")
    }
}

/// Generate a GitHub-style anchor slug from heading text.
fn slugify_anchor(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Turn bare `http(s)://` URLs in plain text into links.
///
/// Text inside code blocks, links, and image alt text is left untouched.
fn autolink(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut verbatim_depth = 0usize;
    for ev in events {
        match ev {
            Event::Start(tag @ (Tag::CodeBlock(_) | Tag::Link { .. } | Tag::Image { .. })) => {
                verbatim_depth += 1;
                out.push(Event::Start(tag));
            }
            Event::End(end @ (TagEnd::CodeBlock | TagEnd::Link | TagEnd::Image)) => {
                verbatim_depth = verbatim_depth.saturating_sub(1);
                out.push(Event::End(end));
            }
            Event::Text(text) if verbatim_depth == 0 => push_linkified(text, &mut out),
            other => out.push(other),
        }
    }
    out
}

/// Characters a URL sheds from its end; matches how prose usually wraps
/// links in punctuation.
const TRAILING_PUNCTUATION: [char; 9] = ['.', ',', ';', ':', '!', '?', ')', '"', '\''];

fn push_linkified<'a>(text: CowStr<'a>, out: &mut Vec<Event<'a>>) {
    if !(text.contains("http://") || text.contains("https://")) {
        out.push(Event::Text(text));
        return;
    }

    let s: &str = &text;
    let mut cursor = 0usize; // start of not-yet-emitted plain text
    let mut search = 0usize;

    while let Some(offset) = find_scheme(&s[search..]) {
        let start = search + offset;

        // Only link URLs at a word boundary.
        let bad_boundary = s[..start]
            .chars()
            .next_back()
            .map(|c| c.is_alphanumeric() || c == '/' || c == ':')
            .unwrap_or(false);
        if bad_boundary {
            search = start + 1;
            continue;
        }

        let tail = &s[start..];
        let end = tail
            .find(|c: char| c.is_whitespace() || c == '<' || c == '>')
            .unwrap_or(tail.len());
        let url = tail[..end].trim_end_matches(TRAILING_PUNCTUATION);

        // A bare scheme with nothing after it is not a link.
        let authority_len = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .map(str::len)
            .unwrap_or(0);
        if authority_len == 0 {
            search = start + 1;
            continue;
        }

        if cursor < start {
            out.push(Event::Text(s[cursor..start].to_string().into()));
        }

        let owned = url.to_string();
        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: owned.clone().into(),
            title: "".into(),
            id: "".into(),
        }));
        out.push(Event::Text(owned.into()));
        out.push(Event::End(TagEnd::Link));

        cursor = start + url.len();
        search = cursor;
    }

    if cursor < s.len() {
        out.push(Event::Text(s[cursor..].to_string().into()));
    }
}

fn find_scheme(s: &str) -> Option<usize> {
    match (s.find("http://"), s.find("https://")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
