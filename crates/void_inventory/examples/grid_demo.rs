//! Grid inventory walkthrough
//!
//! Run with `RUST_LOG=debug` to see every stack operation.

use std::sync::Arc;
use void_inventory::prelude::*;

fn print_grid(inventory: &Inventory) {
    let Some(grid) = inventory.grid() else {
        return;
    };

    for row in 0..grid.rows() {
        let line: String = (0..grid.columns())
            .map(|column| match grid.get(column, row).and_then(|h| inventory.position_of(h)) {
                Some(index) => char::from_digit(index as u32 % 36, 36).unwrap_or('#'),
                None => '.',
            })
            .collect();
        println!("  {line}");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = InventoryConfig::default()
        .with_weight_limit(50.0, 0.75)
        .with_max_slots(24)
        .with_grid(6);
    let mut inventory = Inventory::new(config)?;

    let rifle = Arc::new(
        CatalogEntry::new("rifle")
            .with_description("Bolt-action rifle")
            .with_stackable(false)
            .with_weight(6.0)
            .with_footprint(Footprint::new(4, 1)),
    );
    let medkit = Arc::new(
        CatalogEntry::new("medkit")
            .with_stackable(false)
            .with_weight(1.0)
            .with_footprint(Footprint::new(2, 2)),
    );
    let rounds = Arc::new(CatalogEntry::new("rounds").with_weight(0.05));

    inventory.add_item(&rifle, 1)?;
    inventory.add_item(&medkit, 3)?;
    let outcome = inventory.add_item(&rounds, 240)?;
    println!("rounds: added {}, dropped {}", outcome.added, outcome.dropped);

    println!("grid {}x{}:", inventory.columns(), inventory.rows());
    print_grid(&inventory);

    inventory.remove_item(&medkit, 1)?;
    inventory.remove_at(0, 1)?;
    println!("after removals:");
    print_grid(&inventory);

    for (index, stack) in inventory.stacks().enumerate() {
        println!("[{index}] {} x{} ({:.2} kg)", stack.name(), stack.amount(), stack.weight());
    }
    println!(
        "total weight {:.2}, heavy: {}",
        inventory.total_weight(),
        inventory.is_over_capacity()
    );

    for event in inventory.drain_events().iter().filter(|e| e.is_failure()) {
        println!("! {:?}", event);
    }

    Ok(())
}
