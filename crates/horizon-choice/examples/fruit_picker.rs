//! A scripted walk through a multi-select fruit picker.
//!
//! Run with `RUST_LOG=horizon_choice=debug` to see mutation logs.

use std::sync::Arc;

use horizon_choice::{FilterController, SelectionController};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let fruits = ["apple", "banana", "cherry", "kiwi"];
    let filter = Arc::new(FilterController::new());

    let selection = Arc::new(
        SelectionController::builder()
            .multiple(true)
            .confirmation(true)
            .title("Fruits")
            .value(["apple"])
            .filter(filter.clone())
            .on_changed(|value: &[&str]| println!("changed: {value:?}"))
            .on_close_modal(|value: Option<&[&str]>| match value {
                Some(value) => println!("confirmed: {value:?}"),
                None => println!("dismissed"),
            })
            .build(),
    );

    let select_all = selection.on_selected_many(fruits.to_vec(), None);
    let toggle_kiwi = selection.on_selected("kiwi", None);

    filter.show();
    filter.apply("an");
    selection.select("banana", None);
    println!("all selected: {:?}", selection.selected_many(&fruits));

    select_all(Some(true));
    toggle_kiwi(Some(false));
    println!("all selected: {:?}", selection.selected_many(&fruits));

    selection.close_modal(true);
}
