// =============================================================================
// SHAPE — La description structurelle sur laquelle tout opère
// =============================================================================
//
// Une FORME (Shape) décrit la structure d'une donnée, jamais la donnée
// elle-même. C'est une composition arbitrairement imbriquée de trois genres :
//
//   - SCALAIRE  : une feuille opaque (`number`, `"admin"`, `true`...)
//   - RECORD    : un dictionnaire clé → champ, chaque champ portant une forme
//                 et un drapeau de présence (obligatoire / optionnel)
//   - SEQUENCE  : une liste ordonnée de formes
//
// EXEMPLE VISUEL :
//
//   {                                  Record
//     id: number;                        ├── id    → Scalar(number)
//     tags: [string];                    ├── tags  → Sequence[Scalar(string)]
//     owner?: { name: string };          └── owner?→ Record
//   }                                                 └── name → Scalar(string)
//
// Les formes sont IMMUABLES : chaque opération du moteur prend `&Shape` et
// rend une nouvelle `Shape`. Aucune opération ne lève d'erreur structurelle :
// l'absence s'exprime par `Resolved::NotFound`.
//
// =============================================================================

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::{IndexMap, IndexSet};

use super::path::{Path, Segment};
use super::resolve;
use super::typeside::{BaseType, Scalar, Value};

/// Une clé de record : chaîne, nombre, ou symbole.
///
/// Les clés `Name` et `Number` sont adressables par un chemin ; les symboles
/// ne le sont jamais.
///
/// Comme pour une propriété d'objet, un nom en forme décimale canonique et
/// le nombre correspondant désignent la MÊME clé : `Name("1") == Number(1)`
/// (égalité et hachage). `"01"` ou `"+1"` restent des noms distincts.
#[derive(Debug, Clone)]
pub enum Key {
    Name(String),
    Number(i64),
    Symbol(String),
}

/// La propriété désignée par une clé non symbolique.
#[derive(PartialEq, Eq, Hash)]
enum Property<'a> {
    Number(i64),
    Name(&'a str),
}

/// Un nom qui est l'écriture décimale canonique d'un entier.
fn canonical_number(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let canonical = match digits.as_bytes() {
        [] => false,
        // "0" oui, "-0" non
        [b'0'] => digits.len() == s.len(),
        [first, ..] => *first != b'0' && digits.bytes().all(|b| b.is_ascii_digit()),
    };
    if canonical {
        s.parse().ok()
    } else {
        None
    }
}

impl Key {
    pub fn name(name: impl Into<String>) -> Self {
        Key::Name(name.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Key::Symbol(name.into())
    }

    fn property(&self) -> Option<Property<'_>> {
        match self {
            Key::Name(s) => Some(match canonical_number(s) {
                Some(n) => Property::Number(n),
                None => Property::Name(s),
            }),
            Key::Number(n) => Some(Property::Number(*n)),
            Key::Symbol(_) => None,
        }
    }

    /// La forme qu'une règle reçoit pour cette clé (argument `key` des règles
    /// binaires, argument unique des règles de renommage).
    pub fn to_shape(&self) -> Shape {
        match self {
            Key::Name(s) => Shape::str(s.as_str()),
            Key::Number(n) => Shape::int(*n),
            Key::Symbol(s) => Shape::Scalar(Scalar::Symbol(s.clone())),
        }
    }

    /// Inverse de `to_shape` : `None` si la forme n'est pas une clé de propriété.
    pub fn from_shape(shape: &Shape) -> Option<Key> {
        match shape {
            Shape::Scalar(Scalar::Literal(Value::String(s))) => Some(Key::Name(s.clone())),
            Shape::Scalar(Scalar::Literal(Value::Integer(n))) => Some(Key::Number(*n)),
            Shape::Scalar(Scalar::Symbol(s)) => Some(Key::Symbol(s.clone())),
            _ => None,
        }
    }

    /// La clé désignée par un segment de chemin.
    ///
    /// `Index(3)` désigne `Number(3)`, donc aussi `Name("3")`. Un index
    /// au-delà de `i64::MAX` désigne le nom qui l'écrit.
    pub fn from_segment(segment: &Segment) -> Key {
        match segment {
            Segment::Key(k) => Key::Name(k.clone()),
            Segment::Index(i) => i64::try_from(*i)
                .map(Key::Number)
                .unwrap_or_else(|_| Key::Name(i.to_string())),
        }
    }

    /// Le segment de chemin `segment` désigne-t-il cette clé ?
    pub fn matches_segment(&self, segment: &Segment) -> bool {
        Key::from_segment(segment) == *self
    }

    /// Représentation dans un chemin pointé, si la clé est adressable.
    ///
    /// Le texte émis doit, une fois réanalysé, redésigner la clé : une clé
    /// vide, contenant `.` ou `[`, ou numérique non canonique (`"03"`, lu
    /// comme l'index 3) n'a pas de chemin.
    pub fn path_segment(&self) -> Option<String> {
        let text = match self {
            Key::Name(s) if s.is_empty() || s.contains('.') || s.contains('[') => return None,
            Key::Name(s) => s.clone(),
            Key::Number(n) => n.to_string(),
            Key::Symbol(_) => return None,
        };
        self.matches_segment(&Segment::parse(&text)).then_some(text)
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Symbol(a), Key::Symbol(b)) => a == b,
            _ => match (self.property(), other.property()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.property() {
            Some(property) => {
                state.write_u8(0);
                property.hash(state);
            }
            None => {
                state.write_u8(1);
                if let Key::Symbol(s) = self {
                    s.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(s) if is_identifier(s) => write!(f, "{}", s),
            Key::Name(s) => write!(f, "\"{}\"", s),
            Key::Number(n) => write!(f, "{}", n),
            Key::Symbol(s) => write!(f, "[symbol({})]", s),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Number(n)
    }
}

/// Une entrée de record : la forme de la valeur et son drapeau de présence.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub shape: Shape,
    pub optional: bool,
}

impl Field {
    pub fn required(shape: Shape) -> Self {
        Field { shape, optional: false }
    }

    pub fn optional(shape: Shape) -> Self {
        Field { shape, optional: true }
    }

    /// Même drapeau de présence, autre forme
    pub fn with_shape(&self, shape: Shape) -> Self {
        Field { shape, optional: self.optional }
    }
}

/// Un record : clé → champ, dans l'ordre d'insertion.
///
/// L'ordre sert l'itération (PickBy, GroupBy, AllPaths parcourent les
/// entrées dans l'ordre d'insertion) mais pas l'égalité : deux records avec
/// les mêmes entrées sont égaux quel que soit leur ordre.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: IndexMap<Key, Field>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: IndexMap::new() }
    }

    /// Ajoute un champ obligatoire
    pub fn add(&mut self, key: impl Into<Key>, shape: Shape) -> &mut Self {
        self.fields.insert(key.into(), Field::required(shape));
        self
    }

    /// Ajoute un champ optionnel (`key?: shape`)
    pub fn add_optional(&mut self, key: impl Into<Key>, shape: Shape) -> &mut Self {
        self.fields.insert(key.into(), Field::optional(shape));
        self
    }

    /// Insère (ou remplace en place) un champ. Retourne l'ancien champ.
    pub fn insert(&mut self, key: Key, field: Field) -> Option<Field> {
        self.fields.insert(key, field)
    }

    pub fn get(&self, key: &Key) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Field> {
        self.fields.get_mut(key)
    }

    /// Cherche l'entrée désignée par un segment de chemin (une recherche
    /// par hachage).
    pub fn find(&self, segment: &Segment) -> Option<(&Key, &Field)> {
        self.fields.get_key_value(&Key::from_segment(segment))
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.fields.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Field)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(Key, Field)> for Record {
    fn from_iter<I: IntoIterator<Item = (Key, Field)>>(iter: I) -> Self {
        Record { fields: iter.into_iter().collect() }
    }
}

impl IntoIterator for Record {
    type Item = (Key, Field);
    type IntoIter = indexmap::map::IntoIter<Key, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a Key, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, Key, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{ ")?;
        for (i, (key, field)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            let mark = if field.optional { "?" } else { "" };
            write!(f, "{}{}: {}", key, mark, field.shape)?;
        }
        write!(f, " }}")
    }
}

/// La forme : scalaire, record, ou séquence.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Scalar(Scalar),
    Record(Record),
    Sequence(Vec<Shape>),
}

impl Shape {
    pub fn ty(base: BaseType) -> Self {
        Shape::Scalar(Scalar::Type(base))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Shape::Scalar(Scalar::Literal(Value::String(s.into())))
    }

    pub fn int(n: i64) -> Self {
        Shape::Scalar(Scalar::Literal(Value::Integer(n)))
    }

    pub fn float(x: f64) -> Self {
        Shape::Scalar(Scalar::Literal(Value::Float(x)))
    }

    pub fn bool(b: bool) -> Self {
        Shape::Scalar(Scalar::Literal(Value::Boolean(b)))
    }

    pub fn null() -> Self {
        Shape::Scalar(Scalar::Literal(Value::Null))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Shape::Scalar(Scalar::Symbol(name.into()))
    }

    /// Marqueur de slot `argN` pour les patterns de Create
    pub fn arg(index: usize) -> Self {
        Shape::Scalar(Scalar::Slot(index))
    }

    pub fn undefined() -> Self {
        Shape::Scalar(Scalar::Undefined)
    }

    pub fn sequence(items: impl IntoIterator<Item = Shape>) -> Self {
        Shape::Sequence(items.into_iter().collect())
    }

    pub fn empty_record() -> Self {
        Shape::Record(Record::new())
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Shape::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Shape]> {
        match self {
            Shape::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Shape::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Shape::Scalar(Scalar::Literal(v)) => v.as_str(),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Shape::Scalar(Scalar::Literal(v)) => v.as_integer(),
            _ => None,
        }
    }

    /// Seul le littéral `true` fait passer un prédicat.
    pub fn is_true(&self) -> bool {
        matches!(self, Shape::Scalar(Scalar::Literal(Value::Boolean(true))))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Shape::Scalar(Scalar::Undefined))
    }

    /// Nom court du genre de forme (pour les messages d'erreur)
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Scalar(s) => s.kind(),
            Shape::Record(_) => "record",
            Shape::Sequence(_) => "sequence",
        }
    }

    /// Raccourci pour `resolve::get`
    pub fn get(&self, path: impl Into<Path>) -> Resolved<'_> {
        resolve::get(self, &path.into())
    }
}

impl From<Record> for Shape {
    fn from(r: Record) -> Self {
        Shape::Record(r)
    }
}

impl From<Scalar> for Shape {
    fn from(s: Scalar) -> Self {
        Shape::Scalar(s)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(s) => write!(f, "{}", s),
            Shape::Record(r) => write!(f, "{}", r),
            Shape::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Résultat d'une résolution de chemin : trouvé, ou pas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Found(&'a Shape),
    NotFound,
}

impl<'a> Resolved<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolved::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolved::NotFound)
    }

    pub fn found(&self) -> Option<&'a Shape> {
        match self {
            Resolved::Found(s) => Some(s),
            Resolved::NotFound => None,
        }
    }

    pub fn cloned(&self) -> Option<Shape> {
        self.found().cloned()
    }

    /// La forme à transmettre à une règle : `undefined` si rien n'a été trouvé.
    pub fn into_shape(self) -> Shape {
        match self {
            Resolved::Found(s) => s.clone(),
            Resolved::NotFound => Shape::undefined(),
        }
    }
}

/// Un ensemble littéral de clés (sélecteur de Pick, Omit, Required, Partial,
/// Record).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeySet(IndexSet<Key>);

impl KeySet {
    pub fn new() -> Self {
        KeySet(IndexSet::new())
    }

    pub fn insert(&mut self, key: impl Into<Key>) -> bool {
        self.0.insert(key.into())
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.0.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<Key>> FromIterator<K> for KeySet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        KeySet(iter.into_iter().map(Into::into).collect())
    }
}

/// Construit un `Shape::Record` de champs obligatoires.
///
/// ```
/// use shapeshift::record;
/// use shapeshift::core::shape::Shape;
///
/// let user = record! {
///     "id" => Shape::int(1),
///     "profile" => record! { "name" => Shape::str("ada") },
/// };
/// assert!(user.get("profile.name").is_found());
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::core::shape::Shape::Record($crate::core::shape::Record::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut r = $crate::core::shape::Record::new();
        $(
            r.add($key, $value);
        )+
        $crate::core::shape::Shape::Record(r)
    }};
}
