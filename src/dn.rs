//! Distinguished names.
//!
//! This is a private module. Its public types are re-exported by the parent.

use crate::rdn::Rdn;
use crate::scan;
use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;
use core::{cmp, fmt, hash, ops, slice};

//------------ Dn ------------------------------------------------------------

/// A distinguished name.
///
/// A DN is a sequence of [`Rdn`]s. Its string form lists them separated by
/// commas, starting with the most specific one, e.g.,
/// `cn=Andreas\, Arvidsson,ou=Karlstad,o=Repill Linpro,c=Sverige`. Commas,
/// equals signs and a number of other characters can be part of a value if
/// they are escaped with a backslash.
///
/// The components are indexed in reverse reading order: index 0 is the
/// right-most, least specific RDN of the string form (`c=Sverige` above)
/// and the last index is the left-most, most specific one. Most methods,
/// iteration and ordering follow this index order.
///
/// A value keeps both its string form and the parsed components. The
/// string form is kept exactly as given when parsing. Two DNs are equal if
/// their string forms are equal, no other normalization happens. A DN
/// assembled from components gets the canonical string form produced by
/// joining them.
///
/// You can create a DN by parsing it via the [`FromStr`] trait, from a list
/// of components via [`Dn::from_rdns`] or by collecting an iterator of
/// RDNs. Values are immutable; all the methods that derive a new DN return
/// a new value.
#[derive(Clone, Default)]
pub struct Dn {
    /// The string form.
    value: String,

    /// The components in index order.
    rdns: Vec<Rdn>,
}

/// # Creating Values
///
impl Dn {
    /// Creates the empty DN without any components.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a DN from its components given in index order.
    ///
    /// The first element of `rdns` will be the right-most component of the
    /// string form.
    #[must_use]
    pub fn from_rdns(rdns: Vec<Rdn>) -> Self {
        Dn {
            value: rdns_to_string(&rdns),
            rdns,
        }
    }

    /// Creates a DN from its string form, taking ownership of the string.
    ///
    /// # Errors
    ///
    /// Fails if one of the comma separated components is not a pair of a
    /// non-empty attribute and a non-empty value separated by an unescaped
    /// equals sign.
    pub fn from_string(value: String) -> Result<Self, MalformedDnError> {
        let rdns = string_to_rdns(&value)?;
        Ok(Dn { value, rdns })
    }
}

/// # Inspecting
///
impl Dn {
    /// Returns the string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Converts the DN into its string form.
    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }

    /// Returns the components in index order.
    #[must_use]
    pub fn rdns(&self) -> &[Rdn] {
        &self.rdns
    }

    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rdns.len()
    }

    /// Returns whether the DN has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }

    /// Returns an iterator over the components in index order.
    pub fn iter(&self) -> RdnIter {
        RdnIter(self.rdns.iter())
    }

    /// Returns the component at `index` or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Rdn> {
        self.rdns.get(index)
    }

    /// Returns the component at `index`.
    ///
    /// # Panics
    ///
    /// The method panics if `index` is not smaller than the length of the
    /// DN.
    #[must_use]
    pub fn rdn(&self, index: usize) -> &Rdn {
        match self.rdns.get(index) {
            Some(rdn) => rdn,
            None => panic!(
                "index {} out of range for DN of length {}",
                index,
                self.len()
            ),
        }
    }

    /// Returns the component with the highest index.
    ///
    /// This is the left-most, most specific component of the string form.
    ///
    /// # Panics
    ///
    /// The method panics if the DN is empty.
    #[must_use]
    pub fn last_rdn(&self) -> &Rdn {
        match self.rdns.last() {
            Some(rdn) => rdn,
            None => panic!("empty DN has no last component"),
        }
    }

    /// Returns the raw value of the component with the highest index.
    ///
    /// # Panics
    ///
    /// The method panics if the DN is empty.
    #[must_use]
    pub fn last_value(&self) -> &str {
        self.last_rdn().value()
    }

    /// Returns the first component with the given attribute.
    ///
    /// The components are searched in index order and attributes are
    /// compared exactly, i.e., case-sensitively.
    #[must_use]
    pub fn first_rdn(&self, attribute: &str) -> Option<&Rdn> {
        self.rdns.iter().find(|rdn| rdn.attribute() == attribute)
    }

    /// Returns the index of the first component with the given attribute.
    #[must_use]
    pub fn first_index(&self, attribute: &str) -> Option<usize> {
        self.rdns.iter().position(|rdn| rdn.attribute() == attribute)
    }
}

/// # Deriving Names
///
impl Dn {
    /// Returns a DN made of the components with indexes below `length`.
    ///
    /// # Panics
    ///
    /// The method panics if `length` is larger than the length of the DN.
    #[must_use]
    pub fn sub_dn(&self, length: usize) -> Dn {
        assert!(
            length <= self.len(),
            "sub-DN length {} out of range for DN of length {}",
            length,
            self.len()
        );
        Dn::from_rdns(self.rdns[..length].to_vec())
    }

    /// Returns the parent of the DN.
    ///
    /// The parent lacks the component with the highest index, i.e., the
    /// left-most one. A DN with fewer than two components has no parent.
    #[must_use]
    pub fn parent(&self) -> Option<Dn> {
        self.iter_parents().next()
    }

    /// Returns all ancestors of the DN, starting with its parent.
    ///
    /// Each following DN is one component shorter than the previous one.
    /// The last ancestor consists of the component at index 0 only. The DN
    /// itself is not included.
    #[must_use]
    pub fn parents(&self) -> Vec<Dn> {
        self.iter_parents().collect()
    }

    /// Returns an iterator over the ancestors of the DN.
    ///
    /// The iterator produces the same sequence as [`parents`][Self::parents]
    /// but creates each ancestor only when it is requested.
    pub fn iter_parents(&self) -> ParentIter {
        ParentIter::new(self)
    }

    /// Returns a new DN with an additional component.
    ///
    /// The component is created via [`Rdn::new`] from `attribute` and the
    /// raw `value` and added after the existing components, at the highest
    /// index. It thus becomes the new [`last_rdn`][Self::last_rdn] and
    /// appears left-most in the string form:
    ///
    /// ```
    /// let dn: dn::Dn = "ou=Karlstad,c=Sverige".parse().unwrap();
    /// let dn = dn.append("cn", "Andreas, Arvidsson");
    /// assert_eq!(dn, r"cn=Andreas\, Arvidsson,ou=Karlstad,c=Sverige");
    /// assert_eq!(dn.last_value(), "Andreas, Arvidsson");
    /// ```
    #[must_use]
    pub fn append(&self, attribute: &str, value: &str) -> Dn {
        let mut rdns = Vec::with_capacity(self.len() + 1);
        rdns.extend_from_slice(&self.rdns);
        rdns.push(Rdn::new(attribute, value));
        let res = Dn::from_rdns(rdns);
        #[cfg(feature = "tracing")]
        tracing::trace!(dn = %res, "appended component");
        res
    }
}

/// # Comparing
///
impl Dn {
    /// Compares two DNs by their hierarchy.
    ///
    /// The components are compared pairwise in index order, i.e., starting
    /// with the least specific one, by their raw values via
    /// [`Rdn::value_cmp`]. The first pair that differs decides. If one DN
    /// runs out of components before a difference was found, the shorter DN
    /// is ordered first.
    ///
    /// Sorting by this order keeps all DNs below a common ancestor together.
    #[must_use]
    pub fn hierarchy_cmp(&self, other: &Self) -> cmp::Ordering {
        for (left, right) in self.rdns.iter().zip(other.rdns.iter()) {
            match left.value_cmp(right) {
                cmp::Ordering::Equal => {}
                res => return res,
            }
        }
        self.len().cmp(&other.len())
    }
}

//--- FromStr and TryFrom

impl FromStr for Dn {
    type Err = MalformedDnError;

    /// Parses the string form of a DN.
    ///
    /// The string is split at each unescaped comma, empty parts are
    /// ignored. Each part is split once at its first unescaped equals sign
    /// into attribute and escaped value. The string itself is kept verbatim
    /// as the string form of the DN.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rdns = string_to_rdns(s)?;
        Ok(Dn {
            value: s.into(),
            rdns,
        })
    }
}

impl<'a> TryFrom<&'a str> for Dn {
    type Error = MalformedDnError;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        Self::from_str(s)
    }
}

impl TryFrom<String> for Dn {
    type Error = MalformedDnError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_string(s)
    }
}

//--- FromIterator

impl FromIterator<Rdn> for Dn {
    fn from_iter<I: IntoIterator<Item = Rdn>>(iter: I) -> Self {
        Self::from_rdns(iter.into_iter().collect())
    }
}

//--- AsRef and Index

impl AsRef<str> for Dn {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl ops::Index<usize> for Dn {
    type Output = Rdn;

    fn index(&self, index: usize) -> &Rdn {
        self.rdn(index)
    }
}

//--- PartialEq and Eq

impl PartialEq for Dn {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Dn {}

impl PartialEq<str> for Dn {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<'a> PartialEq<&'a str> for Dn {
    fn eq(&self, other: &&'a str) -> bool {
        self.value == *other
    }
}

impl PartialEq<String> for Dn {
    fn eq(&self, other: &String) -> bool {
        self.value == *other
    }
}

//--- PartialOrd and Ord

impl PartialOrd for Dn {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dn {
    /// Returns the ordering between `self` and `other`.
    ///
    /// DNs are ordered by [`hierarchy_cmp`][Dn::hierarchy_cmp]. Only if
    /// that considers them equal, their string forms decide.
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.hierarchy_cmp(other)
            .then_with(|| self.value.cmp(&other.value))
    }
}

//--- Hash

impl hash::Hash for Dn {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a Dn {
    type Item = &'a Rdn;
    type IntoIter = RdnIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- Display and Debug

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Debug for Dn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Dn({})", self.value)
    }
}

//------------ Parsing and Composing -----------------------------------------

/// Splits the string form of a DN into its components in index order.
fn string_to_rdns(s: &str) -> Result<Vec<Rdn>, MalformedDnError> {
    let mut res = scan::split(s, ',')
        .enumerate()
        .map(|(pos, part)| string_to_rdn(pos, part))
        .collect::<Result<Vec<_>, _>>()?;
    res.reverse();
    #[cfg(feature = "tracing")]
    tracing::trace!(dn = s, components = res.len(), "parsed DN");
    Ok(res)
}

/// Splits a single component at `pos` into attribute and escaped value.
fn string_to_rdn(pos: usize, part: &str) -> Result<Rdn, MalformedDnError> {
    let (attribute, value) = scan::split_once(part, '=')
        .ok_or(MalformedDnError::MissingSeparator(pos))?;
    if attribute.is_empty() {
        return Err(MalformedDnError::EmptyAttribute(pos));
    }
    if value.is_empty() {
        return Err(MalformedDnError::EmptyValue(pos));
    }
    Ok(Rdn::from_escaped(attribute, value))
}

/// Joins components given in index order into the string form.
fn rdns_to_string(rdns: &[Rdn]) -> String {
    let mut res = String::new();
    for (i, rdn) in rdns.iter().rev().enumerate() {
        if i > 0 {
            res.push(',');
        }
        res.push_str(rdn.attribute());
        res.push('=');
        res.push_str(rdn.value_escaped());
    }
    res
}

//------------ RdnIter -------------------------------------------------------

/// An iterator over the components of a DN in index order.
#[derive(Clone, Debug)]
pub struct RdnIter<'a>(slice::Iter<'a, Rdn>);

impl<'a> Iterator for RdnIter<'a> {
    type Item = &'a Rdn;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> DoubleEndedIterator for RdnIter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<'a> ExactSizeIterator for RdnIter<'a> {}

//------------ ParentIter ----------------------------------------------------

/// An iterator over the ever shorter ancestors of a DN.
#[derive(Clone, Debug)]
pub struct ParentIter<'a> {
    rdns: &'a [Rdn],
}

impl<'a> ParentIter<'a> {
    fn new(dn: &'a Dn) -> Self {
        ParentIter { rdns: &dn.rdns }
    }
}

impl<'a> Iterator for ParentIter<'a> {
    type Item = Dn;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rdns.len() < 2 {
            return None;
        }
        self.rdns = &self.rdns[..self.rdns.len() - 1];
        Some(Dn::from_rdns(self.rdns.to_vec()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.rdns.len().saturating_sub(1);
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for ParentIter<'a> {}

//============ Error Types ===================================================

//------------ MalformedDnError ----------------------------------------------

/// The string form of a DN was malformed.
///
/// Each variant carries the position of the offending component, counting
/// the non-empty comma separated parts of the string from the left starting
/// at zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MalformedDnError {
    /// A component did not contain an unescaped equals sign.
    MissingSeparator(usize),

    /// A component had nothing before its equals sign.
    EmptyAttribute(usize),

    /// A component had nothing after its equals sign.
    EmptyValue(usize),
}

impl MalformedDnError {
    /// Returns the position of the offending component.
    #[must_use]
    pub fn position(self) -> usize {
        match self {
            MalformedDnError::MissingSeparator(pos)
            | MalformedDnError::EmptyAttribute(pos)
            | MalformedDnError::EmptyValue(pos) => pos,
        }
    }
}

//--- Display and Error

impl fmt::Display for MalformedDnError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MalformedDnError::MissingSeparator(pos) => {
                write!(f, "malformed DN: component {} lacks '='", pos)
            }
            MalformedDnError::EmptyAttribute(pos) => {
                write!(f, "malformed DN: component {} has no attribute", pos)
            }
            MalformedDnError::EmptyValue(pos) => {
                write!(f, "malformed DN: component {} has no value", pos)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MalformedDnError {}

//============ Testing =======================================================
