// =============================================================================
// SHAPESHIFT — Transformations structurelles sur des formes imbriquées
// =============================================================================
//
// Shapeshift manipule des FORMES : des arbres de records (clés → valeurs),
// de séquences et de scalaires, à la manière d'un système de types
// structurel. On y navigue par chemins pointés, on y renomme des clés, on
// filtre, on fusionne, on instancie des patterns.
//
// Architecture :
//   core/     → le modèle de forme et les opérations pures
//   rule/     → les règles (fonctions invocables) et leur composition
//   strings   → les règles de conversion de casse
//   objects   → chaque opération exposée sous forme de règle composable
//   config    → les réglages du renommage de clés
//   error     → les erreurs d'invocation de règles
//
// Concepts fondamentaux :
//   Shape    = un record, une séquence ou un scalaire
//   Path     = une suite de segments ("a.b[0].c")
//   Rule     = une transformation nommée, appelée sur des formes
//   Resolved = le résultat d'une navigation : trouvé ou introuvable
//
// L'absence d'une valeur n'est jamais une erreur : les navigations rendent
// `NotFound`, les mises à jour impossibles sont des no-op. Seule la mauvaise
// utilisation d'une règle (arité, genre d'argument) produit une `RuleError`.
//
// =============================================================================

pub mod config;
pub mod core;
pub mod error;
pub mod objects;
pub mod rule;
pub mod strings;

pub use crate::config::{CollisionPolicy, MapperConfig};
pub use crate::core::path::{Path, Segment};
pub use crate::core::resolve::Replacement;
pub use crate::core::shape::{Field, Key, KeySet, Record, Resolved, Shape};
pub use crate::core::typeside::{BaseType, Scalar, Value};
pub use crate::error::{RuleError, RuleResult};
pub use crate::rule::{Arg, Bind, Pipe, Rule, SharedRule};
