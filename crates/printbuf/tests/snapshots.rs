#![allow(missing_docs)]

use printbuf::{BufferedPrint, Endl, Fixed, Right, Width, left, right};

struct Row {
    name: &'static str,
    qty: u32,
    price: f64,
    ok: bool,
}

fn render_table(rows: &[Row]) -> String {
    let mut buf = BufferedPrint::new();
    for row in rows {
        buf.append((
            left::<8, _>(row.name),
            '|',
            right::<5, _>(row.qty),
            '|',
            Width::<9, Right, _>::new(row.price).precision(2),
            '|',
            Width::<5, Right, _>::new(row.ok),
            Endl,
        ))
        .unwrap();
    }
    buf.chop(b'\n');
    buf.to_string()
}

#[test]
fn snapshot_table() {
    let rows = [
        Row {
            name: "apples",
            qty: 3,
            price: 1.25,
            ok: true,
        },
        Row {
            name: "blueberries",
            qty: 12_000,
            price: 12.5,
            ok: false,
        },
        Row {
            name: "kiwi",
            qty: 0,
            price: 0.0,
            ok: true,
        },
    ];
    insta::assert_snapshot!(render_table(&rows), @r"
    apples  |    3|     1.25| true
    blueberr|12000|    12.50|false
    kiwi    |    0|     0.00| true
    ");
}

#[test]
fn snapshot_fixed_columns() {
    let mut buf = BufferedPrint::new();
    for v in [0.5, -3.25, 100.0] {
        buf.append((Fixed::with_digits(v, 8, 3).fill(b'.'), ' ', Fixed::new(v, 3), Endl))
            .unwrap();
    }
    buf.chop(b'\n');
    insta::assert_snapshot!(buf.to_string(), @r"
    ...0.500 0.5
    ..-3.250 -3.25
    .100.000 100.0
    ");
}
