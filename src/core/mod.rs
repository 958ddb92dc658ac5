// =============================================================================
// CORE — Le modèle de forme et les opérations pures
// =============================================================================
//
// Ce module regroupe toute la logique structurelle :
// pas d'I/O, pas d'état partagé, uniquement des formes immuables et des
// fonctions qui en construisent de nouvelles.
//
// Architecture :
//   typeside  → les scalaires (types de base, littéraux, symboles, slots)
//   shape     → Key, Field, Record, Shape (= le modèle)
//   path      → les chemins pointés et leur analyse
//   resolve   → Get / Update le long d'un chemin
//   mapping   → MapKeys, MapKeysDeep, MapValues
//   filter    → Pick, Omit, PickBy, OmitBy, GroupBy
//   compose   → Assign, Create, Required, Partial, Record, Keys, Values...
//   enumerate → AllPaths
//
// =============================================================================

pub mod compose;
pub mod enumerate;
pub mod filter;
pub mod mapping;
pub mod path;
pub mod resolve;
pub mod shape;
pub mod typeside;
