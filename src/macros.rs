/// Generate accessors for fields of the global signal table.
///
/// Usage:
/// `global_signals! {
///     pub snapshot_signal => snapshot: Option<DashboardSnapshot>,
///     logs_signal => logs: Vec<String>,
/// }`
#[macro_export]
macro_rules! global_signals {
    ( $( $(#[$meta:meta])* $vis:vis $name:ident => $field:ident : $ty:ty ),+ $(,)? ) => {
        $(
            $(#[$meta])*
            $vis fn $name() -> ::leptos::RwSignal<$ty> {
                $crate::global_state::globals().$field
            }
        )+
    };
}
