//! Serialization of distinguished names.
//!
//! Both [`Dn`] and [`Rdn`] serialize as a newtype struct wrapping their
//! string form. Human-readable formats such as JSON thus see a plain
//! string. A [`Dn`] deserializes from such a string, either wrapped in the
//! newtype or bare, by parsing it. An RDN alone can’t be deserialized; use
//! a [`Dn`] with a single component instead.
#![cfg(feature = "serde")]

use crate::dn::Dn;
use crate::rdn::Rdn;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

//------------ Dn ------------------------------------------------------------

impl serde::Serialize for Dn {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct("Dn", self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Dn {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        use serde::de::Visitor;

        struct InnerVisitor;

        impl<'de> Visitor<'de> for InnerVisitor {
            type Value = Dn;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a distinguished name")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                Dn::from_str(v).map_err(E::custom)
            }

            fn visit_string<E: serde::de::Error>(
                self,
                v: String,
            ) -> Result<Self::Value, E> {
                Dn::from_string(v).map_err(E::custom)
            }
        }

        struct NewtypeVisitor;

        impl<'de> Visitor<'de> for NewtypeVisitor {
            type Value = Dn;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a distinguished name")
            }

            fn visit_newtype_struct<D: serde::Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<Self::Value, D::Error> {
                deserializer.deserialize_str(InnerVisitor)
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                InnerVisitor.visit_str(v)
            }

            fn visit_string<E: serde::de::Error>(
                self,
                v: String,
            ) -> Result<Self::Value, E> {
                InnerVisitor.visit_string(v)
            }
        }

        deserializer.deserialize_newtype_struct("Dn", NewtypeVisitor)
    }
}

//------------ Rdn -----------------------------------------------------------

impl serde::Serialize for Rdn {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct("Rdn", &format_args!("{}", self))
    }
}

//============ Testing =======================================================

#[cfg(test)]
#[cfg(feature = "std")]
mod test {
    use super::*;
    use serde_test::{
        assert_de_tokens, assert_de_tokens_error, assert_ser_tokens,
        assert_tokens, Token,
    };
    use std::vec::Vec;

    #[test]
    fn ser_de() {
        let dn = Dn::from_str(r"cn=Andreas\, Arvidsson,c=Sverige").unwrap();
        assert_tokens(
            &dn,
            &[
                Token::NewtypeStruct { name: "Dn" },
                Token::Str(r"cn=Andreas\, Arvidsson,c=Sverige"),
            ],
        );
        assert_tokens(
            &Dn::empty(),
            &[Token::NewtypeStruct { name: "Dn" }, Token::Str("")],
        );
    }

    #[test]
    fn de_bare_string() {
        assert_de_tokens(
            &Dn::from_str("ou=Karlstad,c=Sverige").unwrap(),
            &[Token::String("ou=Karlstad,c=Sverige")],
        );
    }

    #[test]
    fn de_malformed() {
        assert_de_tokens_error::<Dn>(
            &[Token::NewtypeStruct { name: "Dn" }, Token::Str("Sverige")],
            "malformed DN: component 0 lacks '='",
        );
    }

    #[test]
    fn ser_rdn() {
        assert_ser_tokens(
            &Rdn::new("cn", "Andreas, Arvidsson"),
            &[
                Token::NewtypeStruct { name: "Rdn" },
                Token::Str(r"cn=Andreas\, Arvidsson"),
            ],
        );
    }

    #[test]
    fn json() {
        let dns = [
            Dn::from_str("c=Sverige").unwrap(),
            Dn::from_str(r"cn=a\,b,c=Sverige").unwrap(),
        ];
        let json = serde_json::to_string(&dns).unwrap();
        assert_eq!(json, r#"["c=Sverige","cn=a\\,b,c=Sverige"]"#);
        let back: Vec<Dn> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dns);
        assert!(serde_json::from_str::<Dn>(r#""c=Sverige,x""#).is_err());
    }
}
