// =============================================================================
// PATH — Chemins pointés dans une forme
// =============================================================================
//
// Un chemin est une séquence de SEGMENTS, chacun étant :
//   - une clé   (`user`, `name`) : descente dans un record
//   - un index  (`0`, `12`)      : descente dans une séquence (ou une clé
//                                  numérique d'un record)
//
// SYNTAXE :
//   "a.b.c"        → [a, b, c]
//   "users.0.name" → [users, 0, name]
//   "users[0].name"→ [users, 0, name]   (crochets = sucre pour l'index)
//   "m[1][2]"      → [m, 1, 2]
//   ""             → []                  (chemin vide = la racine)
//
// Le parsing ne peut PAS échouer : un chemin bizarre (`a..b`) produit des
// segments qui ne seront simplement jamais trouvés.
//
// =============================================================================

use std::fmt;

/// Un segment de chemin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// Un morceau composé uniquement de chiffres ASCII est un index.
    pub fn parse(part: &str) -> Self {
        if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(i) = part.parse::<usize>() {
                return Segment::Index(i);
            }
        }
        Segment::Key(part.to_string())
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Key(_) => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{}", k),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Un chemin complet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Chemin vide (la racine)
    pub fn root() -> Self {
        Path { segments: Vec::new() }
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Path { segments }
    }

    /// Découpe une chaîne de chemin en segments.
    pub fn parse(input: &str) -> Self {
        if input.is_empty() {
            return Path::root();
        }
        let mut segments = Vec::new();
        for part in input.split('.') {
            let mut pieces = part.split('[');
            let head = pieces.next().unwrap_or_default();
            let mut brackets = pieces.peekable();
            // `[0].x` : pas de tête avant le premier crochet
            if !(head.is_empty() && brackets.peek().is_some()) {
                segments.push(Segment::parse(head));
            }
            for piece in brackets {
                segments.push(Segment::parse(piece.strip_suffix(']').unwrap_or(piece)));
            }
        }
        Path { segments }
    }

    /// Ajoute un segment (builder)
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(k.into()));
        self
    }

    /// Ajoute un index (builder)
    pub fn index(mut self, i: usize) -> Self {
        self.segments.push(Segment::Index(i));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::parse(&s)
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::parse(s)
    }
}

/// Un entier seul est un chemin à un index (`Get<0, tuple>`).
impl From<usize> for Path {
    fn from(i: usize) -> Self {
        Path { segments: vec![Segment::Index(i)] }
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Path { segments: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> Segment {
        Segment::Key(k.into())
    }

    #[test]
    fn test_parse_dotted() {
        let p = Path::parse("a.b.c");
        assert_eq!(p.segments(), &[key("a"), key("b"), key("c")]);
    }

    #[test]
    fn test_parse_numeric_segments() {
        let p = Path::parse("users.0.name");
        assert_eq!(p.segments(), &[key("users"), Segment::Index(0), key("name")]);
    }

    #[test]
    fn test_parse_brackets() {
        assert_eq!(Path::parse("users[0].name"), Path::parse("users.0.name"));
        assert_eq!(
            Path::parse("m[1][2]").segments(),
            &[key("m"), Segment::Index(1), Segment::Index(2)]
        );
        assert_eq!(Path::parse("[3].x").segments(), &[Segment::Index(3), key("x")]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(Path::parse("").is_empty());
        assert_eq!(Path::parse("a..b").segments(), &[key("a"), key(""), key("b")]);
    }

    #[test]
    fn test_mixed_alnum_is_key() {
        assert_eq!(Path::parse("0a").segments(), &[key("0a")]);
    }

    #[test]
    fn test_builder_and_display() {
        let p = Path::root().key("users").index(0).key("name");
        assert_eq!(p.len(), 3);
        assert_eq!(p.to_string(), "users.0.name");
        assert_eq!(Path::parse(&p.to_string()), p);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Path::from(2usize).segments(), &[Segment::Index(2)]);
    }
}
