const WIDTH: usize = 0x10;

fn printable(chr: u8) -> Option<char> {
    if (0x20..0x7f).contains(&chr) {
        Some(chr as char)
    } else {
        None
    }
}

fn dump_line(offset: usize, data: &[u8]) {
    print!("{:04x}", offset);

    for i in 0..WIDTH {
        if i % 8 == 0 {
            print!(" ");
        }
        if i < data.len() {
            print!(" {:02x}", data[i]);
        } else {
            print!("   ");
        }
    }

    print!("  |");
    for b in data {
        print!("{}", printable(*b).unwrap_or('.'));
    }
    println!("|");
}

/// Dump bytes with offsets and an ASCII gutter.
pub fn hexdump(data: &[u8]) {
    if data.is_empty() {
        println!("(empty)");
        return;
    }
    for (i, chunk) in data.chunks(WIDTH).enumerate() {
        dump_line(i * WIDTH, chunk);
    }
}
