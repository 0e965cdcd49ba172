//! Движок правил Rummy на четверых.
//!
//! Ядро владеет колодой, следит, в какой зоне лежит каждая карта
//! (колода, рука игрока, сброс), ведёт фазы хода и решает, раскладывается
//! ли рука целиком на комбинации (set / run с джокерами).
//!
//! Отрисовка, ввод указателя и сеть – снаружи: они шлют намерения
//! (`engine::Intent` / `api::Command`) и получают сигналы (`engine::RoundSignal`).

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
