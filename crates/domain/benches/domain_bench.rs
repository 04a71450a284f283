use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Cart, CartItem, CustomerId, Money, ProductId, Voucher};

fn cart_of(size: usize) -> Cart {
    let mut cart = Cart::new(CustomerId::new());
    for i in 0..size {
        cart.add_item(CartItem::new(
            format!("SKU-{i:04}").as_str(),
            "Bench Widget",
            2,
            Money::from_cents(1000 + i as i64),
        ))
        .unwrap();
    }
    cart
}

fn bench_fill_cart(c: &mut Criterion) {
    c.bench_function("domain/fill_cart_50", |b| {
        b.iter(|| cart_of(50));
    });
}

fn bench_apply_voucher(c: &mut Criterion) {
    let cart = cart_of(50);

    c.bench_function("domain/apply_voucher_50", |b| {
        b.iter(|| {
            let mut cart = cart.clone();
            cart.apply_voucher(Voucher::percentage("BENCH", 10));
            cart.total
        });
    });
}

fn bench_product_ids(c: &mut Criterion) {
    let cart = cart_of(100);

    c.bench_function("domain/product_ids_100", |b| {
        b.iter(|| cart.product_ids());
    });
}

fn bench_remove_item(c: &mut Criterion) {
    let cart = cart_of(100);
    let target = ProductId::new("SKU-0050");

    c.bench_function("domain/remove_item_100", |b| {
        b.iter(|| {
            let mut cart = cart.clone();
            cart.remove_item(&target).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_fill_cart,
    bench_apply_voucher,
    bench_product_ids,
    bench_remove_item
);
criterion_main!(benches);
