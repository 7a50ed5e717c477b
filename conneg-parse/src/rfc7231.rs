use crate::{Clause, ParseError, Parser, Shape};

// From [RFC7231](https://tools.ietf.org/html/rfc7231#section-5.3):
//
// >     Accept = #( media-range [ accept-params ] )
// >
// >     media-range    = ( "*/*"
// >                      / ( type "/" "*" )
// >                      / ( type "/" subtype )
// >                      ) *( OWS ";" OWS parameter )
// >     accept-params  = weight *( accept-ext )
// >     accept-ext = OWS ";" OWS token [ "=" ( token / quoted-string ) ]
// >
// >     weight = OWS ";" OWS "q=" qvalue
// >
// >     Accept-Language = 1#( language-range [ weight ] )
//
// And `language-range` comes from [RFC4647](https://tools.ietf.org/html/rfc4647#section-2.1):
//
// >     language-range   = (1*8ALPHA *("-" 1*8alphanum)) / "*"
//
// Real clients are sloppier than that. We take `q` anywhere in the
// parameter list, accept `.5` as a qvalue, don't cap subtag lengths, and
// allow whitespace around `=`. The `q` value itself stays strict: a
// header we can't weigh is a header we reject.

pub(crate) fn parse<'a>(opts: &Parser, s: &'a str) -> Result<Vec<Clause<'a>>, ParseError> {
    let bytes = s.as_bytes();
    let mut clauses = Vec::new();
    let mut pos = 0;
    loop {
        pos = skip_ws(bytes, pos);
        match bytes.get(pos) {
            None => return Ok(clauses),
            Some(b',') => pos += 1,
            Some(_) => {
                let (clause, end) = clause(opts, s, pos)?;
                clauses.push(clause);
                pos = end;
            }
        }
    }
}

fn clause<'a>(opts: &Parser, s: &'a str, start: usize) -> Result<(Clause<'a>, usize), ParseError> {
    let bytes = s.as_bytes();
    let end = bytes[start..]
        .iter()
        .position(|&c| is_ws(c) || c == b',' || c == b';')
        .map_or(bytes.len(), |i| start + i);

    if end == start {
        // only a `;` gets here: parameters without a range
        return Err(ParseError::EmptyToken { pos: start });
    }

    let (primary, secondary) = match opts.shape() {
        Shape::Media => media_range(s, start, end)?,
        Shape::Language => (language_range(s, start, end)?, None),
    };

    let mut clause = Clause {
        primary,
        secondary,
        quality: None,
        params: Vec::new(),
    };

    let mut pos = end;
    loop {
        pos = skip_ws(bytes, pos);
        match bytes.get(pos) {
            None => return Ok((clause, pos)),
            Some(b',') => return Ok((clause, pos + 1)),
            Some(b';') => pos = param(s, pos + 1, &mut clause)?,
            Some(&byte) => return Err(ParseError::InvalidToken { pos, byte }),
        }
    }
}

fn media_range(s: &str, start: usize, end: usize) -> Result<(&str, Option<&str>), ParseError> {
    let slash = match s[start..end].find('/') {
        Some(i) => start + i,
        None => return Err(ParseError::MissingSlash { pos: end }),
    };

    let type_ = media_name(s, start, slash)?;
    let subtype = media_name(s, slash + 1, end)?;

    // `*/*` is fine, `*/plain` is not
    if type_ == "*" && subtype != "*" {
        return Err(ParseError::InvalidRange { pos: start });
    }

    Ok((type_, Some(subtype)))
}

fn media_name(s: &str, start: usize, end: usize) -> Result<&str, ParseError> {
    let name = &s[start..end];
    if name.is_empty() {
        return Err(ParseError::EmptyToken { pos: start });
    }
    if name == "*" {
        return Ok(name);
    }

    match name.bytes().position(|c| !is_token(c)) {
        None => Ok(name),
        Some(i) => {
            let byte = name.as_bytes()[i];
            if byte == b'*' {
                Err(ParseError::InvalidRange { pos: start + i })
            } else {
                Err(ParseError::InvalidToken {
                    pos: start + i,
                    byte,
                })
            }
        }
    }
}

fn language_range(s: &str, start: usize, end: usize) -> Result<&str, ParseError> {
    let tag = &s[start..end];
    if tag == "*" {
        return Ok(tag);
    }

    let mut subtag = start;
    for (i, c) in tag.bytes().enumerate() {
        let pos = start + i;
        match c {
            b'-' if pos > subtag => subtag = pos + 1,
            b'-' => return Err(ParseError::EmptyToken { pos }),
            b'*' => return Err(ParseError::InvalidRange { pos }),
            c if c.is_ascii_alphanumeric() => (),
            byte => return Err(ParseError::InvalidToken { pos, byte }),
        }
    }

    // trailing hyphen
    if subtag == end {
        return Err(ParseError::EmptyToken { pos: end });
    }

    Ok(tag)
}

// Parses one `name=value` following a `;`, returning the offset just past it.
fn param<'a>(s: &'a str, start: usize, clause: &mut Clause<'a>) -> Result<usize, ParseError> {
    let bytes = s.as_bytes();
    let start = skip_ws(bytes, start);
    match bytes.get(start) {
        // `text/html;` carries an empty parameter list
        None | Some(b',') | Some(b';') => return Ok(start),
        Some(&byte) if !is_token(byte) => {
            return Err(ParseError::InvalidToken { pos: start, byte });
        }
        Some(_) => (),
    }

    let name_end = scan_token(bytes, start);
    let name = &s[start..name_end];

    let eq = skip_ws(bytes, name_end);
    match bytes.get(eq) {
        Some(b'=') => (),
        None | Some(b',') | Some(b';') => return Err(ParseError::MissingEqual { pos: eq }),
        Some(&byte) => return Err(ParseError::InvalidToken { pos: eq, byte }),
    }

    let value_start = skip_ws(bytes, eq + 1);
    let value_end = match bytes.get(value_start) {
        Some(b'"') => quoted_string(bytes, value_start)?,
        _ => scan_token(bytes, value_start),
    };
    let value = &s[value_start..value_end];

    if name.eq_ignore_ascii_case("q") {
        if clause.quality.is_some() {
            return Err(ParseError::DuplicateQuality { pos: start });
        }
        let q = quality(value).ok_or(ParseError::InvalidQuality { pos: value_start })?;
        clause.quality = Some(q);
    } else if value.is_empty() {
        return Err(ParseError::EmptyToken { pos: value_start });
    } else {
        clause.params.push((name, value));
    }

    Ok(value_end)
}

// Returns the offset just past the closing quote.
fn quoted_string(bytes: &[u8], start: usize) -> Result<usize, ParseError> {
    let mut iter = bytes.iter().enumerate().skip(start + 1);
    while let Some((pos, &c)) = iter.next() {
        match c {
            b'"' => return Ok(pos + 1),
            b'\\' => match iter.next() {
                Some((_, &c)) if is_restricted_quoted_char(c) => (),
                Some((pos, &byte)) => return Err(ParseError::InvalidToken { pos, byte }),
                None => return Err(ParseError::MissingQuote),
            },
            c if is_restricted_quoted_char(c) => (),
            byte => return Err(ParseError::InvalidToken { pos, byte }),
        }
    }
    Err(ParseError::MissingQuote)
}

/// `digits [ "." digits ]` or `"." digits`, between 0 and 1 inclusive.
fn quality(s: &str) -> Option<f32> {
    let (int, frac) = match s.find('.') {
        Some(dot) => (&s[..dot], &s[dot + 1..]),
        None => (s, ""),
    };
    let digits = |part: &str| part.bytes().all(|c| c.is_ascii_digit());

    if !digits(int) || !digits(frac) || (int.is_empty() && frac.is_empty()) {
        return None;
    }

    let q = s.parse::<f32>().ok()?;
    if (0.0..=1.0).contains(&q) {
        Some(q)
    } else {
        None
    }
}

fn scan_token(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&c| !is_token(c))
        .map_or(bytes.len(), |i| start + i)
}

fn skip_ws(bytes: &[u8], mut pos: usize) -> usize {
    while let Some(&c) = bytes.get(pos) {
        if !is_ws(c) {
            break;
        }
        pos += 1;
    }
    pos
}

// Where token is defined as:
//
// >     token = 1*tchar
// >     tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." /
// >        "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA
//
// Except `*`, which is only ever a wildcard on its own.

macro_rules! byte_map {
    ($($flag:expr,)*) => ([
        $($flag != 0,)*
    ])
}

static TOKEN_MAP: [bool; 256] = byte_map![
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 1, 0, 1, 1, 1, 1, 1, 0, 0, 0, 1, 0, 1, 1, 0,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0,
    0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

fn is_token(c: u8) -> bool {
    TOKEN_MAP[c as usize]
}

fn is_ws(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn is_restricted_quoted_char(c: u8) -> bool {
    c == 9 || (c > 31 && c != 127)
}
