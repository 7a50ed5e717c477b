use std::fmt;
use std::str::FromStr;

use serde1::de::{self, Deserialize, Deserializer};
use serde1::ser::{Serialize, SerializeStruct, Serializer};

use super::{Kind, Negotiated, Range};

impl Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Kind;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"media\" or \"language\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Kind, E>
            where
                E: de::Error,
            {
                Kind::from_str(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

impl Serialize for Range {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Serialize for Negotiated {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Negotiated", 3)?;
        state.serialize_field("identifier", self.identifier())?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("index", &self.index())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens_error, assert_ser_tokens, assert_tokens, Token};

    use crate::{negotiate_media, Kind, Range};

    #[test]
    fn kind_tokens() {
        assert_tokens(&Kind::Media, &[Token::Str("media")]);
        assert_tokens(&Kind::Language, &[Token::Str("language")]);
    }

    #[test]
    fn kind_rejects_unknown() {
        assert_de_tokens_error::<Kind>(
            &[Token::Str("charset")],
            "unknown negotiation kind \"charset\", expected \"media\" or \"language\"",
        );
    }

    #[test]
    fn range_as_clause() {
        let range = Range::media("text", "html").with_quality(0.5);
        assert_ser_tokens(&range, &[Token::Str("text/html;q=0.5")]);
    }

    #[test]
    fn negotiated_struct() {
        let chosen = negotiate_media("text/*", &["image/png", "text/csv"]).unwrap();
        assert_ser_tokens(
            &chosen,
            &[
                Token::Struct {
                    name: "Negotiated",
                    len: 3,
                },
                Token::Str("identifier"),
                Token::Str("text/csv"),
                Token::Str("name"),
                Token::Str(""),
                Token::Str("index"),
                Token::U64(1),
                Token::StructEnd,
            ],
        );
    }
}
