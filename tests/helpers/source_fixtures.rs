//! Common source code fixtures for tests.

// Simple declarations
pub const SIMPLE_CLASS: &str = "class Vehicle\nend\n";
pub const SIMPLE_INTERFACE: &str = "interface Drivable\nend\n";
pub const SIMPLE_ENUM: &str = "enum Gear\nlow\nhigh\nend\n";

pub const GREETER: &str = r#"namespace Demo

/** Greets people. */
class Greeter
    private var String greeting

    /**
     * Create a greeter.
     * @param greeting Text put before every name.
     */
    func new(String greeting)
        this.greeting = greeting
    end

    func String greet(String name)
        return greeting + " " + name
    end
end
"#;

pub const FULL_FEATURES: &str = r#"requires "Gui"
pin Dragengine.Gui

namespace Demo.Shapes

/**
 * A shape with an area.
 * @since 1.0
 */
public abstract class Shape implements Measurable
    public static fixed var int SIDES = 0, CORNERS = 0
    protected var float scale

    func new(float scale) super()
        this.scale = scale
    end

    func new() this(1.0)
    end

    func destructor()
    end

    abstract func float area()

    func Shape *(float factor)
        return Shape.new(scale * factor)
    end

    /** @deprecated Use area(). */
    func float size()
        var float total = 0.0, count = 1
        while count > 0
            count--
        end
        for i = 10 downto 0 step 2
            total += i
        end
        select count
        case 0
            total = -total
        else
            total = total / count
        end
        try
            var Block b = block float x
                return x * scale
            end
            total = b.run(total) cast float
        catch Exception e
            throw e
        end
        return total if total castable float else null
    end
end

interface Measurable
    func float area()
end

enum Kind
    round
    angular = 2
end
"#;
